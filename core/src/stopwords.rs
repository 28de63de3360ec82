use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Bundled English stopword list. The repository ships the same list as
/// `stopwords.txt` for the CLIs; both are read-only after load.
pub static DEFAULT_STOPWORDS: &[&str] = &[
    "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
    "be","because","been","before","being","below","between","both","but","by",
    "can","can't","cannot","could","couldn't",
    "did","didn't","do","does","doesn't","doing","don't","down","during",
    "each","few","for","from","further",
    "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
    "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
    "let's","me","more","most","mustn't","my","myself",
    "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
    "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
    "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
    "under","until","up","very",
    "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","will","with","won't","would","wouldn't",
    "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves",
];

pub fn default_stopwords() -> HashSet<String> {
    DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect()
}

/// Load a stopword file: one word per line, trimmed, lowercased,
/// deduplicated. A missing file is a warning, not an error, and yields an
/// empty set; read failures on an existing file propagate.
pub fn load_stopwords(path: &Path) -> io::Result<HashSet<String>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "stopword file not found, continuing with an empty set");
        return Ok(HashSet::new());
    }
    let mut set = HashSet::new();
    for line in fs::read_to_string(path)?.lines() {
        let word = line.trim().to_ascii_lowercase();
        if !word.is_empty() {
            set.insert(word);
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_is_lowercase_and_nonempty() {
        let set = default_stopwords();
        assert!(set.contains("the"));
        assert!(set.contains("will"));
        assert!(set.iter().all(|w| w.chars().all(|c| !c.is_ascii_uppercase())));
    }
}
