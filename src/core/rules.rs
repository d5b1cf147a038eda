use crate::domain::model::Category;
use crate::utils::error::{Result, TagError};
use regex::Regex;

/// 單一啟發式規則：命中即代表該行屬於對應分類
pub struct Rule {
    pub name: &'static str,
    pub category: Category,
    pattern: Regex,
}

impl Rule {
    fn new(name: &'static str, category: Category, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| TagError::RuleError {
            name: name.to_string(),
            source: e,
        })?;
        Ok(Self {
            name,
            category,
            pattern,
        })
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

/// 內建規則集，逐行比對
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn with_default_rules() -> Result<Self> {
        let rules = vec![
            // Network Call
            Rule::new(
                "http-client-method",
                Category::NetworkCall,
                r"(?i)\b(requests|https?|axios|client|session)\.(get|post|put|delete|patch|head)\s*\(",
            )?,
            Rule::new("fetch-call", Category::NetworkCall, r"\bfetch\s*\(")?,
            Rule::new("url-open", Category::NetworkCall, r"\burlopen\s*\(")?,
            // Debug Statement
            Rule::new("print-call", Category::DebugStatement, r"\bprint\s*\(")?,
            Rule::new(
                "console-log",
                Category::DebugStatement,
                r"console\.(log|debug|info|warn|error)\s*\(",
            )?,
            Rule::new(
                "debugger-statement",
                Category::DebugStatement,
                r"\bdebugger\b",
            )?,
            Rule::new(
                "rust-debug-macro",
                Category::DebugStatement,
                r"\b(println|eprintln|dbg)!\s*\(",
            )?,
            // Unfinished Block - 只比對大寫標記，避免誤中一般文字
            Rule::new(
                "todo-marker",
                Category::UnfinishedBlock,
                r"\b(TODO|FIXME|HACK|XXX|NOTE)\b",
            )?,
            // Database Operation
            Rule::new(
                "sql-statement",
                Category::DatabaseOperation,
                r"(?i)\b(SELECT\s+.+\s+FROM|INSERT\s+INTO|UPDATE\s+\w+\s+SET|DELETE\s+FROM)\b",
            )?,
            Rule::new(
                "orm-accessor",
                Category::DatabaseOperation,
                r"\.objects\.(get|filter|all|create|update|delete)\b",
            )?,
            Rule::new(
                "orm-write",
                Category::DatabaseOperation,
                r"\.(save|create|insert)\s*\(",
            )?,
            // Error Handling
            Rule::new("try-block", Category::ErrorHandling, r"^\s*try\s*[:{]?\s*$")?,
            Rule::new(
                "catch-block",
                Category::ErrorHandling,
                r"^\s*\}?\s*(except|catch|rescue)\b",
            )?,
            Rule::new(
                "raise-throw",
                Category::ErrorHandling,
                r"\b(raise|throw)\s+\w",
            )?,
            // Authentication
            Rule::new(
                "token-handling",
                Category::Authentication,
                r"(?i)\b\w*(jwt|token|oauth)\w*\b",
            )?,
            Rule::new(
                "login-call",
                Category::Authentication,
                r"(?i)\b(login|logout|sign_?in|sign_?out)\w*\s*\(",
            )?,
            Rule::new("auth-check", Category::Authentication, r"(?i)authenticat")?,
            Rule::new(
                "password-handling",
                Category::Authentication,
                r"(?i)\b\w*password\w*\b",
            )?,
            // Configuration
            Rule::new(
                "env-read",
                Category::Configuration,
                r"(?i)\b(os\.environ|getenv|env::var|process\.env|dotenv)\b",
            )?,
            Rule::new(
                "config-load",
                Category::Configuration,
                r"(?i)\b(load_config\w*|read_config\w*|get_\w*settings|app_settings|configparser)\b",
            )?,
            Rule::new(
                "api-key",
                Category::Configuration,
                r"(?i)\b(api|secret|access)[_-]?key\b",
            )?,
        ];

        Ok(Self { rules })
    }

    /// 只保留指定分類的規則
    pub fn for_categories(categories: &[Category]) -> Result<Self> {
        let full = Self::with_default_rules()?;
        let rules = full
            .rules
            .into_iter()
            .filter(|r| categories.contains(&r.category))
            .collect();
        Ok(Self { rules })
    }

    /// 回傳命中的規則，每個分類最多一條（依宣告順序取第一條）
    pub fn match_line(&self, line: &str) -> Vec<&Rule> {
        let mut matched: Vec<&Rule> = Vec::new();

        for rule in &self.rules {
            if matched.iter().any(|m| m.category == rule.category) {
                continue;
            }
            if rule.is_match(line) {
                matched.push(rule);
            }
        }

        matched
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories_for(rules: &RuleSet, line: &str) -> Vec<Category> {
        rules.match_line(line).iter().map(|r| r.category).collect()
    }

    #[test]
    fn test_network_call_patterns() {
        let rules = RuleSet::with_default_rules().unwrap();

        assert_eq!(
            categories_for(&rules, "response = requests.get('https://api.example.com')"),
            vec![Category::NetworkCall]
        );
        assert_eq!(
            categories_for(&rules, "fetch_data = http.get('/api/users')"),
            vec![Category::NetworkCall]
        );
        assert_eq!(
            categories_for(&rules, "const res = await fetch('/api/users');"),
            vec![Category::NetworkCall]
        );
        // fetch_data 不是 fetch() 呼叫
        assert!(categories_for(&rules, "fetch_data = 1").is_empty());
    }

    #[test]
    fn test_debug_statement_patterns() {
        let rules = RuleSet::with_default_rules().unwrap();

        assert_eq!(
            categories_for(&rules, "print(\"Debug message\")"),
            vec![Category::DebugStatement]
        );
        assert_eq!(
            categories_for(&rules, "console.log(\"Another debug\")"),
            vec![Category::DebugStatement]
        );
        assert_eq!(
            categories_for(&rules, "debugger()"),
            vec![Category::DebugStatement]
        );
        assert_eq!(
            categories_for(&rules, "println!(\"value: {}\", value);"),
            vec![Category::DebugStatement]
        );
    }

    #[test]
    fn test_unfinished_block_markers_are_case_sensitive() {
        let rules = RuleSet::with_default_rules().unwrap();

        for line in [
            "# TODO: Add error handling",
            "# FIXME: This function is broken",
            "# HACK: Temporary fix for the bug",
            "# NOTE: Remember to update this",
            "// XXX revisit after release",
        ] {
            assert_eq!(
                categories_for(&rules, line),
                vec![Category::UnfinishedBlock],
                "expected marker tag for: {}",
                line
            );
        }

        // 小寫的一般文字不算標記
        assert!(categories_for(&rules, "please note the todo list").is_empty());
        // TODOs 帶字尾也不算
        assert!(categories_for(&rules, "# TODOs go below").is_empty());
    }

    #[test]
    fn test_database_operation_patterns() {
        let rules = RuleSet::with_default_rules().unwrap();

        assert_eq!(
            categories_for(&rules, "query = \"SELECT * FROM users WHERE active = 1\""),
            vec![Category::DatabaseOperation]
        );
        assert_eq!(
            categories_for(&rules, "user = User.objects.get(id=1)"),
            vec![Category::DatabaseOperation]
        );
        assert_eq!(
            categories_for(&rules, "User.create(name=\"John\", email=\"john@example.com\")"),
            vec![Category::DatabaseOperation]
        );
        assert_eq!(
            categories_for(&rules, "users.save()"),
            vec![Category::DatabaseOperation]
        );
    }

    #[test]
    fn test_error_handling_patterns() {
        let rules = RuleSet::with_default_rules().unwrap();

        assert_eq!(
            categories_for(&rules, "try:"),
            vec![Category::ErrorHandling]
        );
        assert_eq!(
            categories_for(&rules, "except Exception as e:"),
            vec![Category::ErrorHandling]
        );
        assert_eq!(
            categories_for(&rules, "} catch (err) {"),
            vec![Category::ErrorHandling]
        );
        assert_eq!(
            categories_for(&rules, "    raise ValueError(\"Custom error\")"),
            vec![Category::ErrorHandling]
        );
    }

    #[test]
    fn test_authentication_patterns() {
        let rules = RuleSet::with_default_rules().unwrap();

        assert_eq!(
            categories_for(&rules, "token = generate_jwt_token(user_id)"),
            vec![Category::Authentication]
        );
        assert_eq!(
            categories_for(&rules, "if user.is_authenticated():"),
            vec![Category::Authentication]
        );
        assert_eq!(
            categories_for(&rules, "login_user(user)"),
            vec![Category::Authentication]
        );
        assert_eq!(
            categories_for(&rules, "password_hash = hash_password(password)"),
            vec![Category::Authentication]
        );
    }

    #[test]
    fn test_configuration_patterns() {
        let rules = RuleSet::with_default_rules().unwrap();

        assert_eq!(
            categories_for(&rules, "api_key = os.environ.get('API_KEY')"),
            vec![Category::Configuration]
        );
        assert_eq!(
            categories_for(&rules, "config = load_config_file()"),
            vec![Category::Configuration]
        );
        assert_eq!(
            categories_for(&rules, "settings = get_app_settings()"),
            vec![Category::Configuration]
        );
    }

    #[test]
    fn test_line_can_match_multiple_categories() {
        let rules = RuleSet::with_default_rules().unwrap();

        let cats = categories_for(&rules, "print(os.environ.get('API_KEY'))");
        assert!(cats.contains(&Category::DebugStatement));
        assert!(cats.contains(&Category::Configuration));
        assert_eq!(cats.len(), 2);
    }

    #[test]
    fn test_at_most_one_rule_per_category() {
        let rules = RuleSet::with_default_rules().unwrap();

        // os.environ 同時命中 env-read 與 api-key，但只留第一條
        let matched = rules.match_line("api_key = os.environ.get('API_KEY')");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "env-read");
    }

    #[test]
    fn test_blank_and_plain_lines_match_nothing() {
        let rules = RuleSet::with_default_rules().unwrap();

        assert!(rules.match_line("").is_empty());
        assert!(rules.match_line("x = 1 + 2").is_empty());
        assert!(rules.match_line("import json").is_empty());
    }

    #[test]
    fn test_for_categories_filters_rules() {
        let rules =
            RuleSet::for_categories(&[Category::NetworkCall, Category::DebugStatement]).unwrap();

        assert!(!rules.is_empty());
        assert!(rules.len() < RuleSet::with_default_rules().unwrap().len());
        assert_eq!(
            categories_for(&rules, "print(\"hi\")"),
            vec![Category::DebugStatement]
        );
        // 規則被過濾掉的分類不再命中
        assert!(categories_for(&rules, "# TODO: later").is_empty());
    }
}
