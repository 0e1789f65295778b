//! Screening status stream.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use super::error::ApiError;
use super::http::HttpClient;
use super::screenings::SingleKey;
use crate::screening::Screening;

/// Buffered transitions a slow consumer can fall behind by before the
/// watcher task blocks.
const CHANNEL_CAPACITY: usize = 8;

impl<H> SingleKey<H>
where
    H: HttpClient + Clone + 'static,
{
    /// Watches a screening, yielding a snapshot on every status
    /// transition.
    ///
    /// The current status is emitted immediately, then one snapshot per
    /// change. The stream ends after a terminal status (`completed` or
    /// `failed`) is yielded, or after the first error; fetch failures
    /// are not retried, matching the rest of the SDK.
    ///
    /// Polling runs on a spawned task, so this must be called from
    /// within a tokio runtime. Dropping the stream stops the task at its
    /// next emission.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use singlekey::{Config, SingleKey};
    /// use std::time::Duration;
    /// use tokio_stream::StreamExt;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = SingleKey::new(&Config::from_env()?)?;
    /// let mut updates = client.watch("pt_123", Duration::from_secs(5));
    ///
    /// while let Some(snapshot) = updates.next().await {
    ///     println!("-> {}", snapshot?.status);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn watch(
        &self,
        purchase_token: &str,
        interval: Duration,
    ) -> ReceiverStream<Result<Screening, ApiError>> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let client = self.clone();
        let token = purchase_token.to_string();

        tokio::spawn(async move {
            let mut last_status = None;

            loop {
                match client.get_screening(&token).await {
                    Ok(screening) => {
                        let transition = last_status != Some(screening.status);
                        last_status = Some(screening.status);
                        let terminal = screening.status.is_terminal();

                        if transition && tx.send(Ok(screening)).await.is_err() {
                            // Receiver dropped; stop watching
                            return;
                        }
                        if terminal {
                            return;
                        }
                    }
                    Err(error) => {
                        let _ = tx.send(Err(error)).await;
                        return;
                    }
                }

                tokio::time::sleep(interval).await;
            }
        });

        ReceiverStream::new(rx)
    }
}
