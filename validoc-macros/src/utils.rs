/// Edit distance between two strings, counted in chars
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

/// Closest known annotation to `input`, if any is within two edits
pub fn find_closest_annotation(input: &str) -> Option<&'static str> {
    const ANNOTATIONS: &[&str] = &["response", "example", "tag", "id", "hidden", "validoc-ignore"];

    let input = input.to_lowercase();
    ANNOTATIONS
        .iter()
        .map(|&annotation| (levenshtein_distance(&input, annotation), annotation))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, annotation)| annotation)
}
