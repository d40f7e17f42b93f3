use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    task::JoinSet,
};

use crate::{
    render::render_as,
    utilities::is_quit_command,
    view::{DefinitionSource, LookupView, ViewState},
};

const BUSY_NOTICE: &str = "Still searching, try again once the current lookup finishes.\n";

/// The interactive prompt around a [`LookupView`].
pub struct Shell<S> {
    view: LookupView<S>,
    json: bool,
    /// Await each lookup before reading the next line instead of running it
    /// in the background. Piped input uses this so no line is refused as busy.
    inline: bool,
}

impl<S> Shell<S>
where
    S: DefinitionSource + 'static,
{
    pub fn new(view: LookupView<S>, json: bool, inline: bool) -> Self {
        Self { view, json, inline }
    }

    /// Reads queries until end of input or a quit command. Lookups still
    /// running at that point are awaited and rendered before returning.
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut pending: JoinSet<ViewState> = JoinSet::new();

        self.prompt(out).await?;
        loop {
            tokio::select! {
                Some(settled) = pending.join_next(), if !pending.is_empty() => {
                    self.write_state(out, &settled?).await?;
                    self.prompt(out).await?;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        out.write_all(b"\n").await?;
                        break;
                    };
                    if is_quit_command(&line) {
                        break;
                    }
                    self.accept(line, out, &mut pending).await?;
                    self.prompt(out).await?;
                }
            }
        }

        while let Some(settled) = pending.join_next().await {
            self.write_state(out, &settled?).await?;
        }
        out.flush().await?;
        Ok(())
    }

    async fn accept<W>(
        &self,
        line: String,
        out: &mut W,
        pending: &mut JoinSet<ViewState>,
    ) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        self.view.set_query(line.trim()).await;
        let state = self.view.snapshot().await;
        if !state.submit_control().enabled {
            if state.is_loading {
                out.write_all(BUSY_NOTICE.as_bytes()).await?;
            }
            return Ok(());
        }

        if self.inline {
            self.view.submit(&line).await;
            self.write_state(out, &self.view.snapshot().await).await?;
        } else {
            let view = self.view.clone();
            pending.spawn(async move {
                view.submit(&line).await;
                view.snapshot().await
            });
            // let the lookup flag itself as loading before the prompt is redrawn
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    async fn prompt<W>(&self, out: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let label = self.view.submit_control().await.label;
        out.write_all(format!("[{label}] >> ").as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }

    async fn write_state<W>(&self, out: &mut W, state: &ViewState) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let rendered = render_as(state, self.json)?;
        let rendered = rendered.trim_end();
        if !rendered.is_empty() {
            out.write_all(format!("\n{rendered}\n").as_bytes()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use dictionary::{Definition, DictionaryError, Entry, LookupResult, Meaning, NotFoundError};

    use super::*;
    use crate::view::MockDefinitionSource;

    fn entry(word: &str) -> Entry {
        Entry {
            word: word.to_owned(),
            phonetic: None,
            phonetics: Vec::new(),
            meanings: vec![Meaning {
                part_of_speech: "noun".to_owned(),
                definitions: vec![Definition {
                    definition: format!("the meaning of {word}"),
                    example: None,
                    synonyms: Vec::new(),
                    antonyms: Vec::new(),
                }],
                synonyms: Vec::new(),
                antonyms: Vec::new(),
            }],
            license: None,
            source_urls: Vec::new(),
        }
    }

    /// Answers every word after a pause, long enough to still be in flight at end of input.
    struct Slow(Duration);

    #[async_trait]
    impl DefinitionSource for Slow {
        async fn get_definition(&self, word: &str) -> Result<LookupResult, DictionaryError> {
            tokio::time::sleep(self.0).await;
            Ok(vec![entry(word)])
        }
    }

    async fn run<S: DefinitionSource + 'static>(source: S, input: &str, inline: bool) -> String {
        let shell = Shell::new(LookupView::new(source), false, inline);
        let mut out = Vec::new();
        shell.run(input.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn lookup_in_flight_at_end_of_input_is_rendered() {
        let out = run(Slow(Duration::from_millis(100)), "hello\n", false).await;

        assert!(out.contains("\nhello\n    noun:\n        1. the meaning of hello\n"));
        assert!(out.starts_with("[Search] >> "));
    }

    #[tokio::test]
    async fn lookup_in_flight_at_quit_is_rendered() {
        let out = run(Slow(Duration::from_millis(100)), "hello\n:q\nignored\n", false).await;

        assert!(out.contains("the meaning of hello"));
        assert!(!out.contains("ignored"));
    }

    #[tokio::test]
    async fn piped_lines_are_all_looked_up_in_order() {
        let mut source = MockDefinitionSource::new();
        source
            .expect_get_definition()
            .times(2)
            .returning(|word| Ok(vec![entry(word)]));

        let out = run(source, "first\nsecond\n", true).await;

        let first = out.find("the meaning of first").expect("first rendered");
        let second = out.find("the meaning of second").expect("second rendered");
        assert!(first < second);
        assert!(!out.contains("Still searching"));
    }

    #[tokio::test]
    async fn slow_piped_lines_are_not_refused() {
        let out = run(Slow(Duration::from_millis(20)), "first\nsecond\n", true).await;

        assert!(out.contains("the meaning of first"));
        assert!(out.contains("the meaning of second"));
        assert!(!out.contains("Still searching"));
    }

    #[tokio::test]
    async fn blank_lines_issue_no_request() {
        let mut source = MockDefinitionSource::new();
        source.expect_get_definition().times(0);

        let out = run(source, "\n   \n", true).await;

        assert_eq!(out, "[Search] >> [Search] >> [Search] >> \n");
    }

    #[tokio::test]
    async fn errors_are_rendered_as_their_message() {
        let mut source = MockDefinitionSource::new();
        source
            .expect_get_definition()
            .times(1)
            .returning(|_| Err(DictionaryError::NotFound(NotFoundError::default())));

        let out = run(source, "zzxcvqq\n", true).await;

        assert!(out.contains("\nWord not found\n"));
    }
}
