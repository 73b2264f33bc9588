//! Fixtures shared by the repository tests.

#![allow(dead_code)]

use greenhomes_db::models::admin_user::{AdminUser, CreateAdminUser};
use greenhomes_db::models::lead::{CreateLead, Lead};
use greenhomes_db::models::project::{CreateProject, Project};
use greenhomes_db::repositories::{AdminUserRepo, LeadRepo, ProjectRepo};
use sqlx::PgPool;

pub fn new_lead(name: &str) -> CreateLead {
    CreateLead {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "+919876543210".to_string(),
        project_id: None,
        message: "Looking for a 2BHK, please call back".to_string(),
        source: None,
        preferred_contact_method: None,
    }
}

pub async fn create_lead(pool: &PgPool, name: &str) -> Lead {
    LeadRepo::create(pool, &new_lead(name)).await.unwrap()
}

pub fn new_project(title: &str, rera: &str) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        location: Some("Whitefield, Bengaluru".to_string()),
        rera_number: rera.to_string(),
        description: Some("Premium apartments".to_string()),
        status: None,
        hero_image_url: "/media/uploads/hero.jpg".to_string(),
        brochure_url: None,
        configurations: vec!["2bhk".to_string(), "3bhk".to_string()],
        amenities: vec!["gym".to_string()],
        is_featured: false,
    }
}

pub async fn create_project(pool: &PgPool, title: &str, rera: &str) -> Project {
    ProjectRepo::create(pool, &new_project(title, rera), None)
        .await
        .unwrap()
}

pub async fn create_admin(pool: &PgPool, email: &str, full_name: &str) -> AdminUser {
    AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            email: email.to_string(),
            full_name: full_name.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: "Admin".to_string(),
            is_superuser: false,
        },
    )
    .await
    .unwrap()
}
