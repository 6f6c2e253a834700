use std::fmt::Write;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use spdlog::{debug, trace};

use crate::config::Blog;
use crate::text_utils::{parse_tags, quote_value, slugify};

/// What the user asked for, before any date or path is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRequest {
    pub title: String,
    pub tags: Vec<String>,
}

impl PostRequest {
    /// Returns `None` for a blank title, which cancels the post.
    /// Surrounding whitespace is trimmed, inner whitespace is kept.
    pub fn from_title(title: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        Some(PostRequest {
            title: title.to_string(),
            tags: vec![],
        })
    }

    pub fn with_tags(mut self, tags_str: &str) -> Self {
        self.tags = parse_tags(tags_str);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub year: i32,
    pub month: u32,
    pub slug: String,
    pub iso_date: String,
    pub dir: PathBuf,
    pub file_name: String,
    pub file_path: PathBuf,
    pub content: String,
}

impl PostRecord {
    pub fn new(request: PostRequest, date: &NaiveDate, blog: &Blog) -> Self {
        let slug = slugify(&request.title);
        let iso_date = format_iso_date(date);
        let dir = post_dir(&blog.root_dir, date);
        let file_name = post_file_name(&iso_date, &slug, &blog.extension);
        let file_path = dir.join(&file_name);
        trace!("Derived slug '{}' for title '{}'", slug, request.title);

        let mut content = render_header(&request.title, &iso_date, &request.tags);
        content.push_str(&render_body(&request.title, &blog.placeholder));

        PostRecord {
            year: date.year(),
            month: date.month(),
            slug,
            iso_date,
            dir,
            file_name,
            file_path,
            content,
        }
    }

    /// Creates the directory tree and writes the post, replacing any file
    /// already at the same path.
    pub fn write(&self) -> io::Result<()> {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            return Err(io::Error::new(e.kind(), format!("Error creating directory {}: {}", self.dir.display(), e)));
        }

        if let Err(e) = fs::write(&self.file_path, self.content.as_bytes()) {
            return Err(io::Error::new(e.kind(), format!("Error writing post {}: {}", self.file_path.display(), e)));
        }

        debug!("Post written to {}", self.file_path.display());
        Ok(())
    }
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `{root}/{year}/{MM}`
pub fn post_dir(root_dir: &Path, date: &NaiveDate) -> PathBuf {
    root_dir
        .join(date.year().to_string())
        .join(format!("{:02}", date.month()))
}

pub fn post_file_name(iso_date: &str, slug: &str, extension: &str) -> String {
    format!("{}-{}.{}", iso_date, slug, extension)
}

fn render_tags(tags: &[String]) -> String {
    let tags: Vec<String> = tags.iter()
        .map(|tag| quote_value(tag))
        .collect();
    format!("[{}]", tags.join(", "))
}

fn render_header(title: &str, iso_date: &str, tags: &[String]) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", quote_value(title));
    let _ = writeln!(&mut buf, "date: {}", quote_value(iso_date));
    let _ = writeln!(&mut buf, "tags: {}", render_tags(tags));
    let _ = writeln!(&mut buf, "lastmod: {}", quote_value(iso_date));
    let _ = writeln!(&mut buf, "draft: false");
    let _ = writeln!(&mut buf, "summary: ");
    let _ = writeln!(&mut buf, "---");
    buf
}

fn render_body(title: &str, placeholder: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "**{}**", title);
    let _ = writeln!(&mut buf, "");
    let _ = writeln!(&mut buf, "{}", placeholder);

    buf
}
