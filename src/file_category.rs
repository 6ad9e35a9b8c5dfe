//! File categorization by extension.
//!
//! This module holds the fixed table of categories a managed directory is
//! sorted into, and the classifier that picks a category for a file name.
//!
//! # Examples
//!
//! ```
//! use destinii::file_category::CategoryTable;
//!
//! let table = CategoryTable::default();
//! assert_eq!(table.classify("report.pdf"), "PDF Files");
//! assert_eq!(table.classify("photo.JPG"), "Images");
//! assert_eq!(table.classify("archive.zip"), "Others");
//! ```

/// Name of the catch-all category used when nothing else matches.
pub const CATCH_ALL: &str = "Others";

/// A named bucket of file extensions.
///
/// The category name doubles as the destination folder name inside the
/// managed directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Display and folder name (e.g. "Images").
    pub name: &'static str,
    /// Lowercase extensions including the leading dot. Empty for the catch-all.
    pub extensions: &'static [&'static str],
}

impl Category {
    /// Returns true if this category lists the given (already lowercased) extension.
    pub fn matches(&self, extension: &str) -> bool {
        self.extensions.contains(&extension)
    }

    /// Returns true for the catch-all category.
    pub fn is_catch_all(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// The fixed category table, in evaluation order.
pub const CATEGORIES: &[Category] = &[
    Category {
        name: "PDF Files",
        extensions: &[".pdf"],
    },
    Category {
        name: "Images",
        extensions: &[
            ".jpg",
            ".jpeg",
            ".png",
            ".gif",
            ".bmp",
            ".webp",
            ".jpg_large",
            ".ashx",
            ".avif",
        ],
    },
    Category {
        name: "Text Files",
        extensions: &[".txt", ".html", ".c", ".py", ".docx", ".md"],
    },
    Category {
        name: "Audio Files",
        extensions: &[".mp3", ".wav", ".aac", ".flac", ".ogg"],
    },
    Category {
        name: "Video Files",
        extensions: &[".mp4", ".mkv", ".avi", ".mov", ".wmv"],
    },
    Category {
        name: CATCH_ALL,
        extensions: &[],
    },
];

/// Returns the lowercased extension of a file name, including the dot.
///
/// Only the last dot counts. A name whose only dot is the leading one
/// (`.bashrc`) or that ends in a dot has no extension, and yields `""`.
///
/// ```
/// use destinii::file_category::extension_of;
///
/// assert_eq!(extension_of("Movie.MKV"), ".mkv");
/// assert_eq!(extension_of("backup.tar.gz"), ".gz");
/// assert_eq!(extension_of(".bashrc"), "");
/// assert_eq!(extension_of("Makefile"), "");
/// ```
pub fn extension_of(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx < file_name.len() - 1 => file_name[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Ordered lookup over a set of categories. First match wins.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTable {
    categories: &'static [Category],
}

impl CategoryTable {
    pub(crate) fn from_categories(categories: &'static [Category]) -> Self {
        Self { categories }
    }

    /// Returns the categories in evaluation order.
    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    /// Returns the folder names of every category, in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.categories.iter().map(|c| c.name).collect()
    }

    /// Picks the category for a file name.
    ///
    /// The extension is compared case-insensitively against each category in
    /// declared order. Files with an unknown extension, or none at all, land
    /// in the catch-all.
    pub fn classify(&self, file_name: &str) -> &'static str {
        let extension = extension_of(file_name);
        if extension.is_empty() {
            return CATCH_ALL;
        }

        self.categories
            .iter()
            .filter(|c| !c.is_catch_all())
            .find(|c| c.matches(&extension))
            .map(|c| c.name)
            .unwrap_or(CATCH_ALL)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::from_categories(CATEGORIES)
    }
}
