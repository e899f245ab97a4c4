//! Rule-based resume parser.
//!
//! Splits raw text into named sections by header lines and pulls name, email
//! and phone out with line-position and pattern heuristics. Deterministic and
//! infallible: empty input yields [`ResumeRecord::default`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsing::models::{dedupe_case_insensitive, ResumeRecord, DEFAULT_CANDIDATE_NAME};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

/// Optional `+CC`, then a 10-digit core whose digits may be split by up to two
/// of space, tab, dot, dash or parentheses. Never spans a line break.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[ \t.\-]?)?\(?\d(?:[ \t.\-()]{0,2}\d){9}").expect("valid phone regex")
});

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year regex"));

const NAME_SCAN_LINES: usize = 5;
const NAME_HEADER_WORDS: &[&str] = &["resume", "cv", "curriculum", "page"];

const BULLET_MARKERS: &[char] = &[
    '•', '-', '*', '·', '▪', '●', '◦', '–', '—', '>', '✓', '➢', '■',
];

const COMPANY_SUFFIXES: &[&str] = &["Inc.", "LLC", "Ltd.", "Pvt.", "Technologies", "Solutions"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Skills,
    Experience,
    Education,
    Projects,
}

/// Header variants, matched as a prefix of the lowercased, colon-trimmed line.
const SECTION_HEADERS: &[(Section, &[&str])] = &[
    (
        Section::Skills,
        &[
            "skills",
            "technical skills",
            "key skills",
            "core skills",
            "skill set",
            "core competencies",
        ],
    ),
    (
        Section::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment history",
            "work history",
            "internships",
        ],
    ),
    (
        Section::Education,
        &[
            "education",
            "academic background",
            "academic qualifications",
            "educational qualifications",
        ],
    ),
    (
        Section::Projects,
        &[
            "projects",
            "key projects",
            "personal projects",
            "academic projects",
        ],
    ),
];

/// Parses `text` into a [`ResumeRecord`] using layout heuristics only.
pub fn parse_sections(text: &str) -> ResumeRecord {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return ResumeRecord::default();
    }

    let headers = detect_headers(&lines);

    ResumeRecord {
        name: detect_name(&lines),
        email: first_match(&EMAIL_RE, text),
        phone: find_phone(text),
        education: section_lines(&lines, &headers, Section::Education).join("; "),
        skills: extract_skills(&section_lines(&lines, &headers, Section::Skills)),
        experience: extract_experience(&section_lines(&lines, &headers, Section::Experience)),
        projects: extract_projects(&section_lines(&lines, &headers, Section::Projects)),
    }
}

fn detect_name(lines: &[&str]) -> String {
    lines
        .iter()
        .take(NAME_SCAN_LINES)
        .find(|line| {
            let lower = line.to_lowercase();
            let len = line.chars().count();
            !NAME_HEADER_WORDS.iter().any(|w| lower.contains(w))
                && len > 3
                && len < 60
                && !line.chars().any(|c| c.is_ascii_digit())
        })
        .map(|line| line.to_string())
        .unwrap_or_else(|| DEFAULT_CANDIDATE_NAME.to_string())
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// First phone match not embedded in a longer digit run.
fn find_phone(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(m) = PHONE_RE.find_at(text, start) {
        let digit_before = m.start() > 0 && bytes[m.start() - 1].is_ascii_digit();
        let digit_after = bytes.get(m.end()).is_some_and(u8::is_ascii_digit);
        if !digit_before && !digit_after {
            return m.as_str().trim().to_string();
        }
        // matches always start on an ASCII byte
        start = m.start() + 1;
    }
    String::new()
}

/// Returns the section a line heads, if any.
pub fn classify_header(line: &str) -> Option<Section> {
    let normalized = line.trim().trim_end_matches(':').trim().to_lowercase();
    SECTION_HEADERS
        .iter()
        .find(|(_, variants)| variants.iter().any(|v| normalized.starts_with(v)))
        .map(|(section, _)| *section)
}

/// Header positions in ascending line order.
fn detect_headers(lines: &[&str]) -> Vec<(usize, Section)> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| classify_header(line).map(|s| (i, s)))
        .collect()
}

/// Lines between each `section` header and the following header.
fn section_lines<'a>(
    lines: &[&'a str],
    headers: &[(usize, Section)],
    section: Section,
) -> Vec<&'a str> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, (_, s))| *s == section)
        .flat_map(|(h, (start, _))| {
            let end = headers.get(h + 1).map_or(lines.len(), |(next, _)| *next);
            lines[start + 1..end].iter().copied()
        })
        .collect()
}

fn is_bullet(line: &str) -> bool {
    line.starts_with(BULLET_MARKERS)
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(BULLET_MARKERS).trim()
}

fn extract_skills(lines: &[&str]) -> Vec<String> {
    let fragments = lines.iter().flat_map(|line| {
        strip_bullet(line)
            .split(|c: char| c == ',' || c == ';')
            .map(|f| f.trim().trim_end_matches('.').trim())
            .filter(|f| f.chars().count() > 1 && !f.to_lowercase().starts_with("experience"))
            .map(String::from)
    });
    dedupe_case_insensitive(fragments)
}

fn extract_experience(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| {
            if is_bullet(line) {
                let stripped = strip_bullet(line);
                return (!stripped.is_empty()).then(|| stripped.to_string());
            }
            let keep = line.contains('@')
                || COMPANY_SUFFIXES.iter().any(|s| line.contains(s))
                || YEAR_RE.is_match(line)
                || line.chars().count() > 20;
            keep.then(|| line.to_string())
        })
        .collect()
}

fn extract_projects(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| {
            if is_bullet(line) {
                let stripped = strip_bullet(line);
                return (!stripped.is_empty()).then(|| stripped.to_string());
            }
            (line.chars().count() > 10).then(|| line.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESUME: &str = "\
Curriculum Vitae
Priya Sharma
priya.sharma@example.in | (022) 555-0199
Technical Skills:
• Rust, Python; SQL.
• python, Docker
- Experienced communicator
Work Experience
Senior Engineer, Acme Technologies
2019 - 2023
- Built ingestion pipeline handling 2M events/day
Led
Education
B.Tech Computer Science
IIT Bombay, 2018
Projects
- Resume parser
Chess engine written in Rust
tiny
";

    #[test]
    fn test_scenario_contact_and_skills() {
        let text = "Jane Doe\njane.doe@example.com\n+1 415-555-0100\nSkills\nPython, SQL, Communication";
        let record = parse_sections(text);
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.email, "jane.doe@example.com");
        assert_eq!(record.phone, "+1 415-555-0100");
        assert_eq!(record.skills, vec!["Python", "SQL", "Communication"]);
        assert!(record.experience.is_empty());
        assert!(record.projects.is_empty());
        assert_eq!(record.education, "");
    }

    #[test]
    fn test_empty_input_yields_default_record() {
        assert_eq!(parse_sections(""), ResumeRecord::default());
        assert_eq!(parse_sections("  \n\n \t\n"), ResumeRecord::default());
    }

    #[test]
    fn test_name_skips_header_words_and_digits() {
        let record = parse_sections(FULL_RESUME);
        assert_eq!(record.name, "Priya Sharma");
    }

    #[test]
    fn test_name_defaults_when_no_candidate_line() {
        let text = "RESUME\nPage 1\n123 Main Street\nab\n555-0100 ext 3";
        assert_eq!(parse_sections(text).name, "Candidate");
    }

    #[test]
    fn test_name_only_scans_first_five_lines() {
        let text = "1\n2\n3\n4\n5\nJohn Smith";
        assert_eq!(parse_sections(text).name, "Candidate");
    }

    #[test]
    fn test_phone_with_parenthesised_area_code() {
        let record = parse_sections(FULL_RESUME);
        assert_eq!(record.phone, "(022) 555-0199");
    }

    #[test]
    fn test_phone_with_dots() {
        let record = parse_sections("Someone\ncall 415.555.0100 anytime");
        assert_eq!(record.phone, "415.555.0100");
    }

    #[test]
    fn test_phone_with_country_code_and_five_digit_groups() {
        let record = parse_sections("Arjun Mehta\n+91 98765 43210");
        assert_eq!(record.phone, "+91 98765 43210");
    }

    #[test]
    fn test_phone_ignores_longer_digit_runs() {
        assert_eq!(parse_sections("A B\nID 123456789012345").phone, "");
        let record = parse_sections("A B\nRef 98765432101234\nMobile 98765 43210");
        assert_eq!(record.phone, "98765 43210");
    }

    #[test]
    fn test_phone_does_not_join_lines() {
        assert_eq!(parse_sections("A B\n12345\n67890").phone, "");
    }

    #[test]
    fn test_skills_split_deduped_and_filtered() {
        let record = parse_sections(FULL_RESUME);
        assert_eq!(record.skills, vec!["Rust", "Python", "SQL", "Docker"]);
    }

    #[test]
    fn test_experience_line_rules() {
        let record = parse_sections(FULL_RESUME);
        assert_eq!(
            record.experience,
            vec![
                "Senior Engineer, Acme Technologies",
                "2019 - 2023",
                "Built ingestion pipeline handling 2M events/day",
            ]
        );
    }

    #[test]
    fn test_education_joined_with_semicolons() {
        let record = parse_sections(FULL_RESUME);
        assert_eq!(record.education, "B.Tech Computer Science; IIT Bombay, 2018");
    }

    #[test]
    fn test_projects_keep_bullets_and_long_lines() {
        let record = parse_sections(FULL_RESUME);
        assert_eq!(
            record.projects,
            vec!["Resume parser", "Chess engine written in Rust"]
        );
    }

    #[test]
    fn test_no_headers_leaves_sections_empty() {
        let text = "Alex Kim\nalex@kim.dev\nI like building distributed systems in Rust, 2021";
        let record = parse_sections(text);
        assert_eq!(record.name, "Alex Kim");
        assert_eq!(record.email, "alex@kim.dev");
        assert!(record.skills.is_empty());
        assert!(record.experience.is_empty());
        assert!(record.projects.is_empty());
        assert!(record.education.is_empty());
    }

    #[test]
    fn test_repeated_section_collects_all_blocks() {
        let text = "Sam Lee\nSkills\nRust\nEducation\nBSc Physics\nKey Skills\nGo, Rust";
        let record = parse_sections(text);
        assert_eq!(record.skills, vec!["Rust", "Go"]);
        assert_eq!(record.education, "BSc Physics");
    }

    #[test]
    fn test_classify_header_variants() {
        assert_eq!(classify_header("TECHNICAL SKILLS:"), Some(Section::Skills));
        assert_eq!(
            classify_header("Employment History"),
            Some(Section::Experience)
        );
        assert_eq!(
            classify_header("Academic Background"),
            Some(Section::Education)
        );
        assert_eq!(classify_header("Personal Projects:"), Some(Section::Projects));
        assert_eq!(classify_header("Jane Doe"), None);
    }

    #[test]
    fn test_parser_is_idempotent() {
        assert_eq!(parse_sections(FULL_RESUME), parse_sections(FULL_RESUME));
    }
}
