use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Events emitted by the router collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    /// A navigation finished; `url` is the final URL after redirects.
    NavigationEnd { url: String },
}

/// Line-oriented input for `replay`, read on a background task.
pub struct ReplayInput {
    rx: mpsc::UnboundedReceiver<String>,
}

impl ReplayInput {
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut lines = reader.lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() || line.starts_with('#') {
                            continue;
                        }
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!("replay input closed: {}", e);
                        break;
                    }
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn skips_blank_and_comment_lines() {
        let script = b"go /acme/apps/spike\n\n# comment\n  up  \n".as_slice();
        let mut input = ReplayInput::from_reader(script);

        assert_eq!(input.next().await.as_deref(), Some("go /acme/apps/spike"));
        assert_eq!(input.next().await.as_deref(), Some("up"));
        assert_eq!(input.next().await, None);
    }
}
