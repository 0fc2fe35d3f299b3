//! `ytthumb fetch` command implementation.

use clap::Args;
use ytthumb_core::{CacheStatus, ThumbnailReplacer, ThumbnailSource};

use super::{CommonArgs, print_settings, replacer_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the fetch command.
#[derive(Args)]
pub(crate) struct FetchArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Video IDs to download.
    #[arg(required = true)]
    video_ids: Vec<String>,
}

impl FetchArgs {
    /// Execute the fetch command.
    ///
    /// # Errors
    ///
    /// Returns an error on the first failed download.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        print_settings(&output, &config);

        let replacer = replacer_from_config(&config);
        let mut fetched = 0;

        for video_id in &self.video_ids {
            match fetch_one(&replacer, video_id)? {
                CacheStatus::Hit => output.info(&format!("{video_id}: cached")),
                CacheStatus::Fetched => {
                    fetched += 1;
                    output.info(&format!("{video_id}: downloaded"));
                }
            }
        }

        output.success(&format!(
            "Fetched {fetched} of {} thumbnails",
            self.video_ids.len()
        ));
        Ok(())
    }
}

/// Cache a single thumbnail, tagging errors with the video ID.
fn fetch_one<S: ThumbnailSource>(
    replacer: &ThumbnailReplacer<S>,
    video_id: &str,
) -> Result<CacheStatus, CliError> {
    replacer
        .cache_thumbnail(video_id)
        .map_err(|source| CliError::Video {
            video_id: video_id.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use ytthumb_core::{MockSource, ThumbnailSettings};

    fn replacer(tmp: &TempDir, source: MockSource) -> ThumbnailReplacer<MockSource> {
        let settings = ThumbnailSettings::new(tmp.path()).with_overlay(false);
        ThumbnailReplacer::with_source(settings, source)
    }

    #[test]
    fn test_fetch_one_downloads_then_hits() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp, MockSource::new(b"thumbnail".to_vec()));

        let first = fetch_one(&replacer, "42").unwrap();
        let second = fetch_one(&replacer, "42").unwrap();

        assert_eq!(first, CacheStatus::Fetched);
        assert_eq!(second, CacheStatus::Hit);
        assert_eq!(replacer.source().requests().len(), 1);
        assert_eq!(
            std::fs::read(tmp.path().join("images/youtube/42.jpg")).unwrap(),
            b"thumbnail"
        );
    }

    #[test]
    fn test_fetch_one_reports_video_id() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp, MockSource::failing(404));

        let err = fetch_one(&replacer, "missing").unwrap_err();

        assert!(err.to_string().starts_with("video missing:"));
    }
}
