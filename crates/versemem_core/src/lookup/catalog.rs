//! Static reference catalogs offered by the add-verse flow.

/// Book entry for book/chapter/verse selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BibleBook {
    /// Lookup slug, e.g. `1corinthians`.
    pub id: &'static str,
    pub name: &'static str,
    pub chapters: u32,
}

const fn book(id: &'static str, name: &'static str, chapters: u32) -> BibleBook {
    BibleBook { id, name, chapters }
}

/// Commonly memorized books.
pub const BIBLE_BOOKS: &[BibleBook] = &[
    book("genesis", "Genesis", 50),
    book("exodus", "Exodus", 40),
    book("psalms", "Psalms", 150),
    book("proverbs", "Proverbs", 31),
    book("ecclesiastes", "Ecclesiastes", 12),
    book("isaiah", "Isaiah", 66),
    book("jeremiah", "Jeremiah", 52),
    book("matthew", "Matthew", 28),
    book("mark", "Mark", 16),
    book("luke", "Luke", 24),
    book("john", "John", 21),
    book("acts", "Acts", 28),
    book("romans", "Romans", 16),
    book("1corinthians", "1 Corinthians", 16),
    book("2corinthians", "2 Corinthians", 13),
    book("galatians", "Galatians", 6),
    book("ephesians", "Ephesians", 6),
    book("philippians", "Philippians", 4),
    book("colossians", "Colossians", 4),
    book("1thessalonians", "1 Thessalonians", 5),
    book("2thessalonians", "2 Thessalonians", 3),
    book("1timothy", "1 Timothy", 6),
    book("2timothy", "2 Timothy", 4),
    book("titus", "Titus", 3),
    book("hebrews", "Hebrews", 13),
    book("james", "James", 5),
    book("1peter", "1 Peter", 5),
    book("2peter", "2 Peter", 3),
    book("1john", "1 John", 5),
    book("2john", "2 John", 1),
    book("3john", "3 John", 1),
    book("jude", "Jude", 1),
    book("revelation", "Revelation", 22),
];

/// Quick-pick references for new users.
pub const POPULAR_MEMORY_VERSES: &[&str] = &[
    "John 3:16",
    "Romans 8:28",
    "Philippians 4:13",
    "Jeremiah 29:11",
    "Psalm 23:1",
    "Isaiah 41:10",
    "Matthew 28:19-20",
    "2 Timothy 3:16",
    "Romans 3:23",
    "Ephesians 2:8-9",
    "1 John 1:9",
    "Proverbs 3:5-6",
    "Joshua 1:9",
    "Psalm 119:11",
    "Matthew 6:33",
    "Romans 12:2",
    "Galatians 2:20",
    "1 Corinthians 10:13",
    "Hebrews 11:1",
    "James 1:2-3",
];

/// Finds a book by slug or display name, case-insensitively.
pub fn find_book(query: &str) -> Option<&'static BibleBook> {
    let needle = query.trim().to_lowercase();
    BIBLE_BOOKS
        .iter()
        .find(|book| book.id == needle || book.name.to_lowercase() == needle)
}
