/// Delimiters tried, in order of preference on ties.
const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// How many non-blank lines are inspected.
const SAMPLE_LINES: usize = 10;

/// Guess the field delimiter of CSV text.
///
/// A candidate wins when it appears the same non-zero number of times on every
/// sampled line (quoted text ignored), the highest such count winning. Quoted
/// newlines break that consistency, so the fallback is whichever candidate is
/// most frequent on the header line. Defaults to `,`.
pub fn sniff_delimiter(sample: &str) -> u8 {
    let lines: Vec<&str> = sample
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();
    let Some(header) = lines.first() else {
        return b',';
    };

    let mut consistent: Option<(u8, usize)> = None;
    for &cand in &CANDIDATES {
        let first = count_unquoted(header, cand);
        if first == 0 {
            continue;
        }
        if lines.iter().skip(1).any(|l| count_unquoted(l, cand) != first) {
            continue;
        }
        if consistent.map_or(true, |(_, best)| first > best) {
            consistent = Some((cand, first));
        }
    }
    if let Some((delimiter, _)) = consistent {
        return delimiter;
    }

    let mut fallback = (b',', 0);
    for &cand in &CANDIDATES {
        let n = count_unquoted(header, cand);
        if n > fallback.1 {
            fallback = (cand, n);
        }
    }
    fallback.0
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for &b in line.as_bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}
