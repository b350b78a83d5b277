//! Bucket session
//!
//! Runs the interactive menu loop. Each iteration reads one menu choice,
//! performs exactly one action against the configured bucket, hands the
//! outcome to a [`Reporter`], and comes back to the menu. Action failures
//! are reported and never end the session; only Exit (or losing the input)
//! does.
//!
//! All store calls are awaited one at a time. Deleting matched keys issues
//! one delete per key in listing order and stops at the first failure, so
//! a partial delete leaves earlier keys deleted.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Error, ErrorKind, Result};
use crate::pattern::KeyPattern;
use crate::traits::{ListResult, ObjectStore, Prompt};

const MENU_PROMPT: &str = "What would you like to do?";
const UPLOAD_PATH_PROMPT: &str = "Enter path to the local file:";
const UPLOAD_KEY_PROMPT: &str = "Enter the target file key (including folder path):";
const FILTER_PROMPT: &str = "Enter a regex to filter the files:";
const DELETE_PROMPT: &str = "Enter a regex to delete matching files:";

/// One entry of the session menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuChoice {
    List,
    Upload,
    FilterList,
    DeleteByPattern,
    Exit,
}

impl MenuChoice {
    /// Menu entries in display order
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::List,
        MenuChoice::Upload,
        MenuChoice::FilterList,
        MenuChoice::DeleteByPattern,
        MenuChoice::Exit,
    ];

    /// Text shown in the menu
    pub const fn label(self) -> &'static str {
        match self {
            MenuChoice::List => "List all files",
            MenuChoice::Upload => "Upload a file",
            MenuChoice::FilterList => "List files by regex",
            MenuChoice::DeleteByPattern => "Delete files by regex",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Position of this entry in [`MenuChoice::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    fn labels() -> Vec<String> {
        Self::ALL.iter().map(|c| c.label().to_string()).collect()
    }
}

/// Outcome of an action, handed to the [`Reporter`] as it happens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Report {
    /// Every key of a non-empty listing
    Listing { keys: Vec<String>, truncated: bool },

    /// The bucket listing was empty
    NoFiles,

    /// Keys matching a filter pattern; may be empty
    Matches {
        pattern: String,
        keys: Vec<String>,
        truncated: bool,
    },

    /// A delete pattern matched nothing, no store call was made
    NoMatches { pattern: String },

    Uploaded {
        key: String,
        location: String,
        size_bytes: u64,
    },

    Deleted { key: String },

    /// A delete failed; `remaining` were never attempted
    DeleteAborted {
        key: String,
        error: String,
        remaining: Vec<String>,
    },

    /// Number of keys removed by one delete-by-pattern action
    DeleteSummary { deleted: usize },

    /// An action failed before producing a result
    Failed {
        action: MenuChoice,
        kind: ErrorKind,
        error: String,
    },
}

/// Receives reports from the session
pub trait Reporter {
    /// A store call is about to start. Cleared by the next report.
    fn busy(&mut self, _activity: &str) {}

    fn report(&mut self, report: Report);
}

/// The interactive loop over one bucket
pub struct BucketSession<'a> {
    bucket: String,
    store: &'a dyn ObjectStore,
    prompt: &'a mut dyn Prompt,
    reporter: &'a mut dyn Reporter,
}

impl<'a> BucketSession<'a> {
    pub fn new(
        bucket: impl Into<String>,
        store: &'a dyn ObjectStore,
        prompt: &'a mut dyn Prompt,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            store,
            prompt,
            reporter,
        }
    }

    /// Present the menu until the user exits, input is gone, or the prompt
    /// returns an option the menu does not have
    pub async fn run(&mut self) {
        let options = MenuChoice::labels();

        loop {
            let choice = match self.prompt.select(MENU_PROMPT, &options) {
                Ok(index) => match MenuChoice::ALL.get(index) {
                    Some(choice) => *choice,
                    None => {
                        tracing::warn!(
                            index,
                            "menu returned an unknown option, ending session"
                        );
                        break;
                    }
                },
                Err(e) => {
                    tracing::debug!(error = %e, "menu input closed, ending session");
                    break;
                }
            };

            if choice == MenuChoice::Exit {
                tracing::debug!("exit selected");
                break;
            }

            self.perform(choice).await;
        }
    }

    /// Run a single menu action, reporting any failure
    pub async fn perform(&mut self, choice: MenuChoice) {
        let result = match choice {
            MenuChoice::List => self.list().await,
            MenuChoice::Upload => self.upload().await,
            MenuChoice::FilterList => self.filter_list().await,
            MenuChoice::DeleteByPattern => self.delete_by_pattern().await,
            MenuChoice::Exit => Ok(()),
        };

        if let Err(error) = result {
            tracing::warn!(action = choice.label(), error = %error, "action failed");
            self.reporter.report(Report::Failed {
                action: choice,
                kind: error.kind(),
                error: error.to_string(),
            });
        }
    }

    async fn list(&mut self) -> Result<()> {
        let listing = self.fetch_listing().await?;

        if listing.is_empty() {
            self.reporter.report(Report::NoFiles);
        } else {
            self.reporter.report(Report::Listing {
                keys: listing.keys().map(str::to_string).collect(),
                truncated: listing.truncated,
            });
        }

        Ok(())
    }

    async fn upload(&mut self) -> Result<()> {
        let path = PathBuf::from(self.prompt.input(UPLOAD_PATH_PROMPT)?);
        let key = self.prompt.input(UPLOAD_KEY_PROMPT)?;

        let data = tokio::fs::read(&path)
            .await
            .map_err(|source| Error::LocalRead {
                path: path.clone(),
                source,
            })?;
        let content_type = mime_guess::from_path(&path)
            .first()
            .map(|mime| mime.essence_str().to_string());

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            size = data.len(),
            content_type = content_type.as_deref().unwrap_or("-"),
            "putting object"
        );
        self.reporter.busy(&format!("Uploading {key}"));
        let put = self
            .store
            .put_object(&self.bucket, &key, data, content_type)
            .await?;

        self.reporter.report(Report::Uploaded {
            key: put.key,
            location: put.location,
            size_bytes: put.size_bytes,
        });
        Ok(())
    }

    async fn filter_list(&mut self) -> Result<()> {
        let pattern = KeyPattern::new(&self.prompt.input(FILTER_PROMPT)?)?;
        let listing = self.fetch_listing().await?;

        self.reporter.report(Report::Matches {
            pattern: pattern.to_string(),
            keys: pattern.filter(&listing),
            truncated: listing.truncated,
        });
        Ok(())
    }

    async fn delete_by_pattern(&mut self) -> Result<()> {
        let pattern = KeyPattern::new(&self.prompt.input(DELETE_PROMPT)?)?;
        let listing = self.fetch_listing().await?;
        let matched = pattern.filter(&listing);

        if matched.is_empty() {
            self.reporter.report(Report::NoMatches {
                pattern: pattern.to_string(),
            });
            return Ok(());
        }

        let mut deleted = 0;
        let mut pending = matched.into_iter();
        while let Some(key) = pending.next() {
            tracing::debug!(bucket = %self.bucket, key = %key, "deleting object");
            self.reporter.busy(&format!("Deleting {key}"));

            match self.store.delete_object(&self.bucket, &key).await {
                Ok(()) => {
                    deleted += 1;
                    self.reporter.report(Report::Deleted { key });
                }
                Err(error) => {
                    let remaining: Vec<String> = pending.by_ref().collect();
                    tracing::warn!(
                        key = %key,
                        error = %error,
                        remaining = remaining.len(),
                        "delete failed, abandoning remaining keys"
                    );
                    self.reporter.report(Report::DeleteAborted {
                        key,
                        error: error.to_string(),
                        remaining,
                    });
                    break;
                }
            }
        }

        self.reporter.report(Report::DeleteSummary { deleted });
        Ok(())
    }

    async fn fetch_listing(&mut self) -> Result<ListResult> {
        tracing::debug!(bucket = %self.bucket, "listing objects");
        self.reporter.busy("Listing objects");

        let listing = self.store.list_objects(&self.bucket).await?;
        if listing.truncated {
            tracing::warn!(
                bucket = %self.bucket,
                returned = listing.items.len(),
                "listing truncated, only the first page is used"
            );
        }

        Ok(listing)
    }
}
