use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::sections::entities::Term;
use chrono::NaiveDate;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_assignment_title(title: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("Assignment title must not be blank");
    }
    Ok(())
}

/// 截止日期必须落在学期内
pub fn validate_due_date(due_date: NaiveDate, term: &Term) -> Result<(), String> {
    if !term.contains(due_date) {
        return Err(format!(
            "Due date {} is outside the term {} {} ({} to {})",
            due_date, term.semester, term.year, term.start_date, term.end_date
        ));
    }
    Ok(())
}

pub fn validate_score(score: Option<i32>) -> Result<(), &'static str> {
    match score {
        Some(score) if score < 0 => Err("Score must not be negative"),
        _ => Ok(()),
    }
}
