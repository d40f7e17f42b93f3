pub fn is_quit_command(line: &str) -> bool {
    matches!(
        line.trim().to_ascii_lowercase().as_str(),
        ":q" | ":quit" | ":exit" | ":e" | ":l" | ":leave"
    )
}
