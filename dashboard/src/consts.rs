pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const COMMITS_PER_PAGE: u8 = 100;

// Problem-solving board tracked when no config file is given
pub const DEFAULT_HEADING: &str = "PROBLEM SOLVING";
pub const DEFAULT_MARKER: &str = "BaekjoonHub";
pub const DEFAULT_REPOSITORIES: [(&str, &str); 4] = [
    ("Byeonjin", "plantCodingTestGrass"),
    ("coding-frog117", "Programmers"),
    ("annyoon", "ps"),
    ("PIGMONGKEY", "Algorithm"),
];

// Card texts
pub const WEEKLY_COUNT_LABEL: &str = "이번 주에 풀이한 문제 수";
pub const SOLVED_DATE_LABEL: &str = "풀이 날짜";
pub const LOCAL_DATE_FORMAT: &str = "%Y. %-m. %-d.";

pub fn below_threshold_warning(min_count: u32) -> String {
    format!("💸 이번 주 {min_count}문제 미만! 💸")
}
