use std::io;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use spdlog::{debug, info};

use crate::config::Blog;
use crate::opener::{try_open, FileOpener, OpenOutcome};
use crate::post::{PostRecord, PostRequest};
use crate::prompt::Prompt;

pub const BANNER: &str = "--- Blog Post Generator ---";
pub const TITLE_PROMPT: &str = "Enter article title: ";
pub const TAGS_PROMPT: &str = "Enter tags (comma-separated): ";
pub const CANCELLED: &str = "Title cannot be empty, operation cancelled.";
const SEPARATOR: &str = "----------------------";

pub struct ScaffoldOptions<'a> {
    /// Skips the title prompt when set
    pub title: Option<String>,
    /// Skips the tags prompt when set
    pub tags: Option<String>,
    pub date: NaiveDate,
    pub blog: &'a Blog,
    pub dry_run: bool,
}

#[derive(Debug, PartialEq)]
pub enum ScaffoldOutcome {
    Cancelled,
    DryRun(PostRecord),
    Created {
        path: PathBuf,
        /// `None` when opening was disabled
        open: Option<OpenOutcome>,
    },
}

fn answer<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>, given: &Option<String>, question: &str) -> io::Result<String> {
    match given {
        Some(value) => Ok(value.clone()),
        None => prompt.ask(question),
    }
}

fn report_open<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>, outcome: &OpenOutcome, path: &Path) -> io::Result<()> {
    match outcome {
        OpenOutcome::Opened => prompt.say("File opened automatically."),
        OpenOutcome::OpenerNotFound => prompt.say(&format!("Could not open the file automatically. Please open it manually: {}", path.display())),
        OpenOutcome::Failed(reason) => prompt.say(&format!("Error while opening the file automatically: {}", reason)),
    }
}

/// Asks for a title and tags, writes the dated post and tries to open it.
///
/// Filesystem errors are returned as is. A failure to open the written file
/// is reported to the user and still counts as a successful run.
pub fn run<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    options: &ScaffoldOptions,
    opener: Option<&dyn FileOpener>,
) -> io::Result<ScaffoldOutcome> {
    prompt.say(BANNER)?;

    let title = answer(prompt, &options.title, TITLE_PROMPT)?;
    let Some(request) = PostRequest::from_title(&title) else {
        prompt.say(CANCELLED)?;
        info!("Post creation cancelled, empty title");
        return Ok(ScaffoldOutcome::Cancelled);
    };

    let tags = answer(prompt, &options.tags, TAGS_PROMPT)?;
    let request = request.with_tags(&tags);

    let record = PostRecord::new(request, &options.date, options.blog);
    debug!("Post path for {} is {}", record.iso_date, record.file_path.display());

    if options.dry_run {
        prompt.say(&format!("Path: {}", record.file_path.display()))?;
        prompt.say("")?;
        prompt.say(record.content.trim_end())?;
        return Ok(ScaffoldOutcome::DryRun(record));
    }

    record.write()?;
    info!("Created post {}", record.file_path.display());

    prompt.say(&format!("\n{}", SEPARATOR))?;
    prompt.say("File created successfully!")?;
    prompt.say(&format!("Path: {}", record.file_path.display()))?;
    prompt.say(SEPARATOR)?;

    let open = match opener {
        Some(opener) => {
            let outcome = try_open(opener, &record.file_path);
            report_open(prompt, &outcome, &record.file_path)?;
            Some(outcome)
        }
        None => None,
    };

    Ok(ScaffoldOutcome::Created {
        path: record.file_path,
        open,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;
    use std::io::{Cursor, ErrorKind};

    use tempfile::TempDir;

    use super::*;

    struct RecordingOpener {
        opened: RefCell<Vec<PathBuf>>,
        result: Option<ErrorKind>,
    }

    impl RecordingOpener {
        fn new(result: Option<ErrorKind>) -> Self {
            RecordingOpener { opened: RefCell::new(vec![]), result }
        }
    }

    impl FileOpener for RecordingOpener {
        fn open(&self, path: &Path) -> io::Result<()> {
            self.opened.borrow_mut().push(path.to_path_buf());
            match self.result {
                None => Ok(()),
                Some(kind) => Err(io::Error::new(kind, "launch failed")),
            }
        }

        fn describe(&self) -> String {
            "recording".to_string()
        }
    }

    fn blog_in(tmp: &TempDir) -> Blog {
        Blog {
            root_dir: tmp.path().join("data").join("blog"),
            ..Blog::default()
        }
    }

    fn options(blog: &Blog) -> ScaffoldOptions {
        ScaffoldOptions {
            title: None,
            tags: None,
            date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            blog,
            dry_run: false,
        }
    }

    fn run_with(input: &str, options: &ScaffoldOptions, opener: Option<&dyn FileOpener>) -> (ScaffoldOutcome, String) {
        let mut prompt = Prompt::new(Cursor::new(input.to_string()), Vec::new());
        let outcome = run(&mut prompt, options, opener).unwrap();
        let output = String::from_utf8(prompt.into_output()).unwrap();
        (outcome, output)
    }

    #[test]
    fn test_happy_case() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(&tmp);
        let opener = RecordingOpener::new(None);

        let (outcome, output) = run_with("My First Post\na, b ,\"c\", ,d\n", &options(&blog), Some(&opener));

        let expected_path = blog.root_dir.join("2026").join("03").join("2026-03-09-my-first-post.mdx");
        assert_eq!(outcome, ScaffoldOutcome::Created {
            path: expected_path.clone(),
            open: Some(OpenOutcome::Opened),
        });
        assert_eq!(*opener.opened.borrow(), vec![expected_path.clone()]);

        let content = fs::read_to_string(&expected_path).unwrap();
        assert!(content.starts_with("---\ntitle: \"My First Post\"\ndate: \"2026-03-09\"\n"));
        assert!(content.contains("tags: [\"a\", \"b\", \"c\", \"d\"]\n"));

        let expected_output = format!(
            "{}\n{}{}\n----------------------\nFile created successfully!\nPath: {}\n----------------------\nFile opened automatically.\n",
            BANNER, TITLE_PROMPT, TAGS_PROMPT, expected_path.display());
        assert_eq!(output, expected_output);
    }

    #[test]
    fn test_empty_title_cancels() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(&tmp);
        let opener = RecordingOpener::new(None);

        for input in ["\nrust\n", "   \nrust\n", ""] {
            let (outcome, output) = run_with(input, &options(&blog), Some(&opener));
            assert_eq!(outcome, ScaffoldOutcome::Cancelled);
            assert!(output.ends_with(&format!("{}\n", CANCELLED)));
            assert!(!output.contains(TAGS_PROMPT));
        }

        assert!(!tmp.path().join("data").exists());
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn test_empty_tags() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(&tmp);

        let (outcome, _) = run_with("Tagless\n\n", &options(&blog), None);
        let ScaffoldOutcome::Created { path, open } = outcome else {
            panic!("post not created");
        };
        assert!(open.is_none());
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("\ntags: []\n"));
    }

    #[test]
    fn test_missing_opener_reports_after_success() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(&tmp);
        let opener = RecordingOpener::new(Some(ErrorKind::NotFound));

        let (outcome, output) = run_with("Post\nx\n", &options(&blog), Some(&opener));
        let ScaffoldOutcome::Created { path, open } = outcome else {
            panic!("post not created");
        };
        assert_eq!(open, Some(OpenOutcome::OpenerNotFound));
        assert!(path.exists());

        let created = output.find("File created successfully!").unwrap();
        let manual = output.find("Please open it manually").unwrap();
        assert!(created < manual);
        assert!(output.ends_with(&format!("Please open it manually: {}\n", path.display())));
    }

    #[test]
    fn test_failed_opener() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(&tmp);
        let opener = RecordingOpener::new(Some(ErrorKind::PermissionDenied));

        let (outcome, output) = run_with("Post\nx\n", &options(&blog), Some(&opener));
        let ScaffoldOutcome::Created { open, .. } = outcome else {
            panic!("post not created");
        };
        assert_eq!(open, Some(OpenOutcome::Failed("launch failed".to_string())));
        assert!(output.ends_with("Error while opening the file automatically: launch failed\n"));
    }

    #[test]
    fn test_same_title_overwrites() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(&tmp);

        let (first, _) = run_with("Same Title\none\n", &options(&blog), None);
        let (second, _) = run_with("Same Title\ntwo\n", &options(&blog), None);
        assert_eq!(first, second);

        let ScaffoldOutcome::Created { path, .. } = second else {
            panic!("post not created");
        };
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("tags: [\"two\"]"));
    }

    #[test]
    fn test_title_spacing() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(&tmp);

        let (outcome, _) = run_with("  Spaced   Out  \n\n", &options(&blog), None);
        let ScaffoldOutcome::Created { path, .. } = outcome else {
            panic!("post not created");
        };
        assert!(path.ends_with("2026-03-09-spaced-out.mdx"));
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("\ntitle: \"Spaced   Out\"\n"));
        assert!(content.contains("\n**Spaced   Out**\n"));
    }

    #[test]
    fn test_given_title_and_tags() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(&tmp);
        let mut opts = options(&blog);
        opts.title = Some("From Flags".to_string());
        opts.tags = Some("cli".to_string());

        let (outcome, output) = run_with("", &opts, None);
        assert!(matches!(outcome, ScaffoldOutcome::Created { .. }));
        assert!(!output.contains(TITLE_PROMPT));
        assert!(!output.contains(TAGS_PROMPT));
    }

    #[test]
    fn test_dry_run() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(&tmp);
        let opener = RecordingOpener::new(None);
        let mut opts = options(&blog);
        opts.dry_run = true;

        let (outcome, output) = run_with("Dry Post\nrust\n", &opts, Some(&opener));
        let ScaffoldOutcome::DryRun(record) = outcome else {
            panic!("expected dry run");
        };
        assert_eq!(record.file_name, "2026-03-09-dry-post.mdx");
        assert!(output.contains("**Dry Post**"));
        assert!(!tmp.path().join("data").exists());
        assert!(opener.opened.borrow().is_empty());
    }
}
