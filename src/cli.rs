//! Maintenance CLI for the photo store.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::SecondsFormat;
use clap::{ArgGroup, Parser, Subcommand};
use cv_app::PhotoService;
use cv_core::{CacheStats, CvId, MimeType, PhotoBlob, PhotoError, PhotoId, PhotoProjection, StorageInfo};
use serde::Serialize;

/// Exit status when the requested photo does not exist.
pub const EXIT_NOT_FOUND: u8 = 1;

#[derive(Debug, Parser)]
#[command(name = "cvphoto", version, about = "Inspect and maintain the CV photo store")]
pub struct Cli {
    /// Path to a TOML config file (defaults to <data dir>/cvphoto/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an image file for a CV and print the new photo id
    Store {
        file: PathBuf,
        #[arg(long)]
        cv: String,
        /// MIME type; guessed from the file extension when omitted
        #[arg(long)]
        mime: Option<String>,
    },
    /// Write a photo's bytes to a file
    Get {
        id: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// List stored photos as JSON
    List {
        #[arg(long)]
        cv: Option<String>,
    },
    /// Delete one photo, or every photo of a CV
    #[command(group(ArgGroup::new("target").required(true).args(["id", "cv"])))]
    Delete {
        id: Option<String>,
        #[arg(long)]
        cv: Option<String>,
    },
    /// Move a photo to another CV
    Reassign {
        id: String,
        #[arg(long)]
        cv: String,
    },
    /// Delete photos whose CV is not listed and not provisional
    Cleanup {
        #[arg(long = "keep", num_args = 0..)]
        keep: Vec<String>,
    },
    /// Print storage usage and availability as JSON
    Info,
}

#[derive(Debug, Serialize)]
struct ListedPhoto {
    id: PhotoId,
    cv_id: CvId,
    uploaded_at_ms: i64,
    uploaded_at: Option<String>,
}

impl From<PhotoProjection> for ListedPhoto {
    fn from(p: PhotoProjection) -> Self {
        let uploaded_at = p
            .uploaded_at()
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true));
        Self {
            id: p.id,
            cv_id: p.cv_id,
            uploaded_at_ms: p.uploaded_at_ms,
            uploaded_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct InfoReport {
    available: bool,
    storage: Option<StorageInfo>,
    cache: CacheStats,
}

fn user_facing(err: PhotoError) -> anyhow::Error {
    anyhow::anyhow!("{} ({})", err.user_message(), err)
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

/// Execute one command and return the process exit status.
pub async fn run(
    command: Command,
    service: &PhotoService,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    match command {
        Command::Store { file, cv, mime } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let mime_type = match mime {
                Some(mime) => MimeType(mime),
                None => MimeType::from_extension(
                    file.extension().and_then(|e| e.to_str()).unwrap_or_default(),
                ),
            };
            let id = service
                .store_photo(PhotoBlob::new(bytes, mime_type), &CvId::from(cv))
                .await
                .map_err(user_facing)?;
            writeln!(out, "{}", id)?;
        }
        Command::Get { id, out: path } => {
            let Some(blob) = service.get_photo(&PhotoId::from(id.as_str())).await else {
                tracing::warn!(photo_id = %id, "Photo not found");
                return Ok(EXIT_NOT_FOUND);
            };
            tokio::fs::write(&path, &blob.bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writeln!(out, "{} ({} bytes, {})", path.display(), blob.size_bytes, blob.mime_type)?;
        }
        Command::List { cv } => {
            let photos: Vec<ListedPhoto> = match cv {
                Some(cv) => service
                    .get_photos_by_cv_id(&CvId::from(cv))
                    .await
                    .iter()
                    .map(|record| record.projection().into())
                    .collect(),
                None => service
                    .get_all_photos_with_cv_ids()
                    .await
                    .into_iter()
                    .map(ListedPhoto::from)
                    .collect(),
            };
            print_json(out, &photos)?;
        }
        Command::Delete { id, cv } => {
            let deleted = match (id, cv) {
                (Some(id), _) => {
                    let id = PhotoId::from(id);
                    let existed = service.get_photo(&id).await.is_some();
                    service.delete_photo(&id).await.map_err(user_facing)?;
                    usize::from(existed)
                }
                (None, Some(cv)) => service
                    .delete_photos_by_cv_id(&CvId::from(cv))
                    .await
                    .map_err(user_facing)?,
                (None, None) => anyhow::bail!("Either a photo id or --cv is required"),
            };
            print_json(out, &serde_json::json!({ "deleted": deleted }))?;
        }
        Command::Reassign { id, cv } => {
            service
                .update_photo_cv_id(&PhotoId::from(id), &CvId::from(cv))
                .await;
        }
        Command::Cleanup { keep } => {
            let keep: Vec<CvId> = keep.into_iter().map(CvId::from).collect();
            let report = service.cleanup_orphaned_photos(&keep).await;
            print_json(out, &report)?;
        }
        Command::Info => {
            let report = InfoReport {
                available: service.is_storage_available(),
                storage: service.get_storage_info().await,
                cache: service.get_cache_stats(),
            };
            print_json(out, &report)?;
        }
    }
    Ok(0)
}
