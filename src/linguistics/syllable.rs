//! Heuristic English syllable counting.
//!
//! Counts vowel groups (`y` counts as a vowel) and corrects for the common
//! silent endings: final `e`, `-ed` after anything but `t`/`d`, and `-es`
//! after anything but a sibilant. Every word containing a letter has at least
//! one syllable.

/// Count the syllables of a single word. Non-letters are ignored.
pub fn count_word_syllables(word: &str) -> usize {
    let letters: Vec<u8> = word
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let is_vowel = |b: u8| matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'y');

    let mut count = 0;
    let mut previous_vowel = false;
    for &b in &letters {
        let vowel = is_vowel(b);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    let n = letters.len();
    if count > 1 && n >= 3 {
        let before = letters[n - 2];
        let before_suffix = letters[n - 3];
        let last = letters[n - 1];

        // "-le" after a consonant is its own syllable, as in "table".
        let consonant_le = before == b'l' && !is_vowel(before_suffix);
        let silent_e = last == b'e' && !consonant_le && !is_vowel(before);
        let silent_ed = before == b'e'
            && last == b'd'
            && !matches!(before_suffix, b't' | b'd')
            && !is_vowel(before_suffix);
        let silent_es = before == b'e'
            && last == b's'
            && !matches!(before_suffix, b's' | b'x' | b'z' | b'c' | b'g' | b'h')
            && !is_vowel(before_suffix);

        if silent_e || silent_ed || silent_es {
            count -= 1;
        }
    }

    count.max(1)
}

/// Count the syllables of every whitespace-delimited word in `text`.
pub fn count_syllables(text: &str) -> usize {
    text.split_whitespace().map(count_word_syllables).sum()
}
