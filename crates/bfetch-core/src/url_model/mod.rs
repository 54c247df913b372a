//! Maps a work-list URL to the local file it is saved as.
//!
//! Files are named by the URL's final path segment and placed directly under
//! the configured output directory.

mod path;
mod sanitize;

pub use path::last_path_segment;
pub use sanitize::sanitize_filename;

use std::collections::hash_map::{Entry, HashMap};
use std::path::{Path, PathBuf};

/// Name used when a URL has no usable final segment.
const FALLBACK_FILENAME: &str = "download.bin";

/// Derives the local filename for `url` from its last path segment.
///
/// - `derive_filename("https://example.com/pool/main/a.deb")` → `"a.deb"`
/// - `derive_filename("https://example.com/")` → `"download.bin"`
pub fn derive_filename(url: &str) -> String {
    let Some(segment) = last_path_segment(url) else {
        return FALLBACK_FILENAME.to_string();
    };
    let name = sanitize_filename(&segment);
    if name.is_empty() || name == "." || name == ".." {
        FALLBACK_FILENAME.to_string()
    } else {
        name
    }
}

/// Full output path for `url` under `output_dir`.
pub fn output_path(output_dir: &Path, url: &str) -> PathBuf {
    output_dir.join(derive_filename(url))
}

/// Finds URLs whose derived filename repeats an earlier one in the list.
///
/// Returns `(index, first_index)` pairs in list order. Such items share one
/// output file: a later failure removes what an earlier success wrote.
pub fn shared_filenames<'a>(urls: impl IntoIterator<Item = &'a str>) -> Vec<(usize, usize)> {
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut shared = Vec::new();
    for (index, url) in urls.into_iter().enumerate() {
        match first_seen.entry(derive_filename(url)) {
            Entry::Occupied(e) => shared.push((index, *e.get())),
            Entry::Vacant(e) => {
                e.insert(index);
            }
        }
    }
    shared
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_of_url() {
        assert_eq!(derive_filename("https://example.com/archive.zip"), "archive.zip");
        assert_eq!(
            derive_filename("http://mirror.example.org/debian/pool/main/c/curl/curl_8.deb"),
            "curl_8.deb"
        );
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        assert_eq!(
            derive_filename("https://example.com/video.mp4?token=abc#t=10"),
            "video.mp4"
        );
    }

    #[test]
    fn root_and_dot_segments_fall_back() {
        assert_eq!(derive_filename("https://example.com/"), "download.bin");
        assert_eq!(derive_filename("https://example.com"), "download.bin");
        assert_eq!(derive_filename("https://example.com/.."), "download.bin");
    }

    #[test]
    fn unparseable_url_uses_text_after_last_slash() {
        assert_eq!(derive_filename("not a url/but/file.txt"), "file.txt");
    }

    #[test]
    fn output_path_joins_dir() {
        assert_eq!(
            output_path(Path::new("downloads"), "https://example.com/a/b.iso"),
            PathBuf::from("downloads/b.iso")
        );
    }

    #[test]
    fn shared_filenames_reports_later_duplicates() {
        let urls = [
            "https://a/x/f.bin",
            "https://b/g.bin",
            "https://b/y/f.bin",
            "https://c/f.bin?v=2",
            "https://c/",
        ];
        assert_eq!(shared_filenames(urls), vec![(2, 0), (3, 0)]);
    }

    #[test]
    fn shared_filenames_empty_when_names_unique() {
        assert!(shared_filenames(["https://a/1.iso", "https://a/2.iso"]).is_empty());
    }
}
