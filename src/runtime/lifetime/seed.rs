//! 演示数据
//!
//! 仅在 `seed.enabled` 打开且用户表为空时写入。

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::errors::{GradebookError, Result};
use crate::models::sections::requests::{
    CreateCourseRequest, CreateSectionRequest, CreateTermRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;

const DEMO_INSTRUCTORS: &[(&str, &str)] = &[("ted", "ted@csumb.edu"), ("dave", "dave@csumb.edu")];
const DEMO_STUDENTS: &[(&str, &str)] = &[
    ("sam", "sam@csumb.edu"),
    ("sama", "sama@csumb.edu"),
    ("joe", "joe@csumb.edu"),
];

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| GradebookError::date_parse(format!("{year}-{month}-{day}")))
}

/// 写入演示数据：两名教师、三名学生、2025 秋季学期、两门课各一个教学班
pub async fn seed_demo_data(storage: &Arc<dyn Storage>, password: &str) -> Result<()> {
    let password_hash = hash_password(password)?;

    for (name, email) in DEMO_INSTRUCTORS {
        storage
            .create_user(CreateUserRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password_hash.clone(),
                role: UserRole::Instructor,
            })
            .await?;
    }

    let mut students = Vec::with_capacity(DEMO_STUDENTS.len());
    for (name, email) in DEMO_STUDENTS {
        let user = storage
            .create_user(CreateUserRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password_hash.clone(),
                role: UserRole::Student,
            })
            .await?;
        students.push(user);
    }

    let term = storage
        .create_term(CreateTermRequest {
            year: 2025,
            semester: "Fall".to_string(),
            start_date: date(2025, 8, 20)?,
            end_date: date(2025, 12, 17)?,
        })
        .await?;

    storage
        .create_course(CreateCourseRequest {
            course_id: "cst489".to_string(),
            title: "Software Engineering".to_string(),
            credits: 4,
        })
        .await?;
    storage
        .create_course(CreateCourseRequest {
            course_id: "cst363".to_string(),
            title: "Introduction to Database".to_string(),
            credits: 4,
        })
        .await?;

    let ted_section = storage
        .create_section(CreateSectionRequest {
            course_id: "cst489".to_string(),
            term_id: term.id,
            section_id: 1,
            building: "90".to_string(),
            room: "B104".to_string(),
            times: "M W 10:00-11:50".to_string(),
            instructor_email: "ted@csumb.edu".to_string(),
        })
        .await?;
    let dave_section = storage
        .create_section(CreateSectionRequest {
            course_id: "cst363".to_string(),
            term_id: term.id,
            section_id: 1,
            building: "90".to_string(),
            room: "B210".to_string(),
            times: "T Th 14:00-15:50".to_string(),
            instructor_email: "dave@csumb.edu".to_string(),
        })
        .await?;

    // sam 与 sama 选 ted 的课，joe 选 dave 的课
    for student in &students {
        let section_no = if student.email == "joe@csumb.edu" {
            dave_section.section_no
        } else {
            ted_section.section_no
        };
        storage.create_enrollment(student.id, section_no).await?;
    }

    info!(
        "Demo data seeded: {} instructors, {} students, term {} {}",
        DEMO_INSTRUCTORS.len(),
        DEMO_STUDENTS.len(),
        term.semester,
        term.year
    );
    Ok(())
}

/// 用户表为空时写入演示数据，密码优先取 SEED_PASSWORD
pub async fn seed_if_empty(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} user(s), skipping demo seed", count);
            return;
        }
        Ok(_) => {
            info!("No users found in database, seeding demo data...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping demo seed", e);
            return;
        }
    }

    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  SEED_PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated password for demo accounts: {}", pwd);
        warn!("==========================================================");
        pwd
    });

    if let Err(e) = seed_demo_data(storage, &password).await {
        warn!("Failed to seed demo data: {}", e);
    }
}
