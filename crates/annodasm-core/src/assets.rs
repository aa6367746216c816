use crate::comments::{CommentEntry, parse_comments};
use crate::profile::Platform;
use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};
use std::path::Path;

static PROFILES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets/profiles");

/// Bundled comment table text for `platform`, if it ships one.
pub fn bundled_comments_text(platform: Platform) -> Option<&'static str> {
    let path = Path::new(platform.slug()).join("comments.txt");
    PROFILES.get_file(path).and_then(|f| f.contents_utf8())
}

pub fn load_comments(platform: Platform) -> Result<Vec<CommentEntry>> {
    let Some(content) = bundled_comments_text(platform) else {
        log::debug!("No bundled comments for {}", platform);
        return Ok(Vec::new());
    };
    let entries = parse_comments(content)
        .with_context(|| format!("Bundled comments for {} are malformed", platform))?;
    log::debug!("Loaded {} comments for {}", entries.len(), platform);
    Ok(entries)
}

/// Loads a user comment file in the same format as the bundled tables.
pub fn load_comments_file(path: &Path) -> Result<Vec<CommentEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read comments file {:?}", path))?;
    parse_comments(&content).with_context(|| format!("Malformed comments file {:?}", path))
}
