//! Attachment descriptors and their resolution into payload content.

use std::path::{Path, PathBuf};

use url::Url;

use super::MailError;

/// An attachment as supplied by the caller.
///
/// The variant is decided once, when the attachment is created, and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// Bytes already in memory.
    Inline { filename: String, data: Vec<u8> },
    /// A file on the local filesystem, read when the payload is built.
    Local {
        path: PathBuf,
        filename: Option<String>,
    },
    /// A file the provider fetches itself. `url` is kept exactly as given.
    Remote { url: String, filename: Option<String> },
}

/// What an [`Attachment`] turns into inside a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Inline { name: String, data: Vec<u8> },
    Link { name: String, url: String },
}

impl Attachment {
    pub fn inline(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Attachment::Inline {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// Classify `path` as a remote URL or a local file.
    ///
    /// Anything that parses as an absolute URL is remote. Single-letter
    /// schemes are Windows drive letters (`C:\...`), so those stay local.
    pub fn from_path(path: impl AsRef<str>) -> Self {
        let path = path.as_ref();
        match Url::parse(path) {
            Ok(url) if url.scheme().len() > 1 => Attachment::Remote {
                url: path.to_string(),
                filename: None,
            },
            _ => Attachment::Local {
                path: PathBuf::from(path),
                filename: None,
            },
        }
    }

    /// Set the display name shown to recipients.
    pub fn with_filename(self, name: impl Into<String>) -> Self {
        let name = name.into();
        match self {
            Attachment::Inline { data, .. } => Attachment::Inline {
                filename: name,
                data,
            },
            Attachment::Local { path, .. } => Attachment::Local {
                path,
                filename: Some(name),
            },
            Attachment::Remote { url, .. } => Attachment::Remote {
                url,
                filename: Some(name),
            },
        }
    }

    /// Turn the descriptor into payload content, reading local files.
    pub fn resolve(&self) -> Result<Resolved, MailError> {
        match self {
            Attachment::Inline { filename, data } => Ok(Resolved::Inline {
                name: filename.clone(),
                data: data.clone(),
            }),
            Attachment::Remote { url, filename } => Ok(Resolved::Link {
                name: filename.clone().unwrap_or_else(|| url_filename(url)),
                url: url.clone(),
            }),
            Attachment::Local { path, filename } => {
                let data = std::fs::read(path).map_err(|source| MailError::AttachmentRead {
                    path: path.clone(),
                    source,
                })?;
                Ok(Resolved::Inline {
                    name: filename.clone().unwrap_or_else(|| path_filename(path)),
                    data,
                })
            }
        }
    }
}

/// Last non-empty path segment of `raw` as written, ignoring query and
/// fragment. Falls back to the host, then to `attachment`.
fn url_filename(raw: &str) -> String {
    let without_query = raw.split(['?', '#']).next().unwrap_or(raw);
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None => without_query
            .split_once(':')
            .map_or(without_query, |(_, path)| path),
    };

    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
        .or_else(|| {
            Url::parse(raw)
                .ok()
                .and_then(|url| url.host_str().map(str::to_string))
        })
        .unwrap_or_else(|| "attachment".to_string())
}

fn path_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_with_a_scheme_are_remote() {
        let attachment = Attachment::from_path("https://example.com/files/report.pdf?dl=1#top");
        assert!(matches!(attachment, Attachment::Remote { .. }));
    }

    #[test]
    fn plain_paths_are_local() {
        for path in ["/tmp/report.pdf", "relative/report.pdf", "report.pdf", r"C:\docs\report.pdf"] {
            assert!(
                matches!(Attachment::from_path(path), Attachment::Local { .. }),
                "{path} should be local"
            );
        }
    }

    #[test]
    fn remote_name_comes_from_last_segment() {
        let resolved = Attachment::from_path("https://example.com/files/report.pdf?dl=1#top")
            .resolve()
            .unwrap();
        assert_eq!(
            resolved,
            Resolved::Link {
                name: "report.pdf".into(),
                url: "https://example.com/files/report.pdf?dl=1#top".into(),
            }
        );
    }

    #[test]
    fn remote_name_skips_trailing_slash() {
        let resolved = Attachment::from_path("https://example.com/files/dir/")
            .resolve()
            .unwrap();
        assert!(matches!(resolved, Resolved::Link { name, .. } if name == "dir"));
    }

    #[test]
    fn remote_name_falls_back_to_host() {
        let resolved = Attachment::from_path("https://example.com/").resolve().unwrap();
        assert!(matches!(resolved, Resolved::Link { name, .. } if name == "example.com"));
    }

    #[test]
    fn remote_url_is_kept_as_written() {
        for raw in [
            "https://example.com",
            "https://Example.COM:443/files/My Report.pdf",
            "https://example.com/a/../b.pdf",
        ] {
            match Attachment::from_path(raw).resolve().unwrap() {
                Resolved::Link { url, .. } => assert_eq!(url, raw),
                other => panic!("expected a link for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn remote_name_is_the_raw_segment() {
        let resolved = Attachment::from_path("https://Example.COM:443/files/My Report.pdf")
            .resolve()
            .unwrap();
        assert!(matches!(resolved, Resolved::Link { name, .. } if name == "My Report.pdf"));

        let resolved = Attachment::from_path("https://example.com").resolve().unwrap();
        assert!(matches!(resolved, Resolved::Link { name, .. } if name == "example.com"));
    }

    #[test]
    fn explicit_filename_wins() {
        let resolved = Attachment::from_path("https://example.com/a.bin")
            .with_filename("b.bin")
            .resolve()
            .unwrap();
        assert!(matches!(resolved, Resolved::Link { name, .. } if name == "b.bin"));
    }

    #[test]
    fn local_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let resolved = Attachment::from_path(path.to_str().unwrap())
            .resolve()
            .unwrap();
        assert_eq!(
            resolved,
            Resolved::Inline {
                name: "notes.txt".into(),
                data: b"hello".to_vec(),
            }
        );
    }

    #[test]
    fn missing_local_file_fails() {
        let err = Attachment::from_path("/definitely/not/here.txt")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, MailError::AttachmentRead { .. }));
    }
}
