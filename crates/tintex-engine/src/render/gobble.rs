/// Remove `depth` leading characters from every line of `text`.
///
/// Line breaks are kept, so the number of lines never changes. Lines shorter
/// than `depth` become empty.
pub fn gobble(text: &str, depth: usize) -> String {
    if depth == 0 {
        return text.to_string();
    }

    text.split_inclusive('\n')
        .map(|line| {
            let (content, newline) = match line.strip_suffix('\n') {
                Some(content) => (content, "\n"),
                None => (line, ""),
            };
            let cut = content
                .char_indices()
                .nth(depth)
                .map_or(content.len(), |(index, _)| index);
            format!("{}{newline}", &content[cut..])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("    a\n    b\n", 4, "a\nb\n")]
    #[case("    a\n      b\n", 4, "a\n  b\n")]
    #[case("  a\nxy\n", 4, "\n\n")]
    #[case("abc", 1, "bc")]
    #[case("\n\n", 3, "\n\n")]
    #[case("ééé\n", 2, "é\n")]
    #[case("keep\n", 0, "keep\n")]
    fn gobbles_each_line(#[case] input: &str, #[case] depth: usize, #[case] expected: &str) {
        assert_eq!(gobble(input, depth), expected);
    }

    #[test]
    fn line_count_is_preserved() {
        let input = "a\n\n    b\nc\n";
        assert_eq!(gobble(input, 10).lines().count(), input.lines().count());
    }
}
