use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use super::{ResultCard, measure::FontBook, render_png};
use crate::content;
use crate::error::{RenderError, ShareError};

/// Encoded card plus the metadata a share surface needs.
#[derive(Debug, Clone)]
pub struct ShareRequest {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub title: String,
    pub caption: String,
}

impl ShareRequest {
    pub fn for_card(card: &ResultCard, bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: content::RESULT_FILE_NAME.to_string(),
            title: content::SHARE_TITLE.to_string(),
            caption: card.share_caption(),
        }
    }
}

/// Platform mechanism that hands the card to another application.
#[async_trait]
pub trait ShareSurface: Send + Sync {
    fn is_available(&self) -> bool;

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareError>;
}

/// Share surface backed by an external program, invoked as
/// `<program> <png path> <title> <caption>`. A non-zero exit status is
/// treated as the user dismissing the share.
#[derive(Debug, Clone)]
pub struct CommandShare {
    program: PathBuf,
    staging_dir: PathBuf,
}

impl CommandShare {
    pub fn new(program: impl Into<PathBuf>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            staging_dir: staging_dir.into(),
        }
    }
}

fn find_program(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 {
        return program.is_file().then(|| program.to_path_buf());
    }
    let search = std::env::var_os("PATH")?;
    std::env::split_paths(&search)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

#[async_trait]
impl ShareSurface for CommandShare {
    fn is_available(&self) -> bool {
        find_program(&self.program).is_some()
    }

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        let staged = self.staging_dir.join(&request.file_name);
        tokio::fs::write(&staged, &request.bytes)
            .await
            .map_err(|e| ShareError::Failed(format!("staging {}: {}", staged.display(), e)))?;

        let status = tokio::process::Command::new(&self.program)
            .arg(&staged)
            .arg(&request.title)
            .arg(&request.caption)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .map_err(|e| ShareError::Failed(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            debug!(?status, "share command declined");
            Err(ShareError::Cancelled)
        }
    }
}

/// Fallback when no share surface is available: save the PNG to a directory.
#[derive(Debug, Clone)]
pub struct FileDownload {
    dir: PathBuf,
}

impl FileDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn save(&self, request: &ShareRequest) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(&request.file_name);
        tokio::fs::write(&path, &request.bytes).await?;
        Ok(path)
    }
}

/// Guards against a second export while one is in flight.
#[derive(Debug, Clone, Default)]
pub struct ShareGate {
    busy: Arc<AtomicBool>,
}

impl ShareGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<ShareTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ShareTicket {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Held for the duration of one export. Dropping it releases the gate.
#[derive(Debug)]
pub struct ShareTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for ShareTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Turns a card into PNG bytes.
pub trait CardRenderer: Send + Sync {
    fn render(&self, card: &ResultCard) -> Result<Vec<u8>, RenderError>;
}

impl CardRenderer for FontBook {
    fn render(&self, card: &ResultCard) -> Result<Vec<u8>, RenderError> {
        render_png(card, self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Shared,
    /// The share surface was dismissed or rejected the card.
    Dismissed,
    Downloaded {
        path: PathBuf,
        notice: String,
    },
    Failed {
        notice: String,
    },
    /// No drawing surface; nothing was produced.
    Aborted,
}

impl ExportOutcome {
    pub fn notice(&self) -> Option<&str> {
        match self {
            ExportOutcome::Downloaded { notice, .. } | ExportOutcome::Failed { notice } => {
                Some(notice)
            }
            _ => None,
        }
    }
}

pub struct ResultExporter {
    renderer: Option<Arc<dyn CardRenderer>>,
    surface: Option<Arc<dyn ShareSurface>>,
    download: FileDownload,
}

impl ResultExporter {
    pub fn new(
        renderer: Option<Arc<dyn CardRenderer>>,
        surface: Option<Arc<dyn ShareSurface>>,
        download: FileDownload,
    ) -> Self {
        Self {
            renderer,
            surface,
            download,
        }
    }

    /// Render, encode and hand off the card. Runs to a single terminal
    /// outcome; `ticket` is released when this returns or unwinds.
    pub async fn export(&self, card: ResultCard, ticket: ShareTicket) -> ExportOutcome {
        let _ticket = ticket;
        info!(score = card.score, total = card.total, "exporting result card");

        let Some(renderer) = self.renderer.clone() else {
            error!("result card skipped: no fonts loaded");
            return ExportOutcome::Aborted;
        };

        let rendered = tokio::task::spawn_blocking(move || renderer.render(&card)).await;
        let bytes = match rendered {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(RenderError::Encoding(reason))) => {
                error!(%reason, "result card encoding failed");
                return ExportOutcome::Failed {
                    notice: content::SHARE_FAILED_NOTICE.to_string(),
                };
            }
            Ok(Err(e)) => {
                error!(error = %e, "result card skipped");
                return ExportOutcome::Aborted;
            }
            Err(e) => {
                error!(error = %e, "result card render task failed");
                return ExportOutcome::Aborted;
            }
        };

        let request = ShareRequest::for_card(&card, bytes);
        if let Some(surface) = self.surface.as_ref().filter(|s| s.is_available()) {
            return match surface.share(&request).await {
                Ok(()) => {
                    info!("result card shared");
                    ExportOutcome::Shared
                }
                Err(ShareError::Cancelled) => {
                    info!("share dismissed");
                    ExportOutcome::Dismissed
                }
                Err(e) => {
                    warn!(error = %e, "share rejected");
                    ExportOutcome::Dismissed
                }
            };
        }

        match self.download.save(&request).await {
            Ok(path) => {
                info!(path = %path.display(), "result card saved");
                ExportOutcome::Downloaded {
                    path,
                    notice: content::DOWNLOAD_NOTICE.to_string(),
                }
            }
            Err(e) => {
                error!(error = %e, "result card could not be saved");
                ExportOutcome::Failed {
                    notice: content::SHARE_FAILED_NOTICE.to_string(),
                }
            }
        }
    }
}
