//! Integration tests for the filter / search / sort / paginate pipeline.

mod common;

use greenhomes_core::lead::{
    DEFAULT_LEAD_PAGE_SIZE, DEFAULT_LEAD_SORT, LEAD_PAGE_SIZES, LEAD_SORT_FIELDS,
};
use greenhomes_core::listing::{PageMeta, PageRequest, SortKey};
use greenhomes_core::project::{DEFAULT_PROJECT_SORT, PROJECT_SORT_FIELDS};
use greenhomes_db::models::lead::{LeadFilter, UpdateLead};
use greenhomes_db::models::project::ProjectFilter;
use greenhomes_db::repositories::{LeadRepo, ProjectRepo};
use sqlx::PgPool;

use common::{create_lead, create_project};

fn lead_page(page: Option<i64>, size: Option<i64>) -> PageRequest {
    PageRequest::resolve(page, size, LEAD_PAGE_SIZES, DEFAULT_LEAD_PAGE_SIZE)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_name(pool: PgPool) {
    create_lead(&pool, "Rajesh Kumar").await;
    create_lead(&pool, "Priya Sharma").await;

    let filter = LeadFilter {
        search: Some("kumar".to_string()),
        ..Default::default()
    };
    let (rows, total) = LeadRepo::search(&pool, &filter, DEFAULT_LEAD_SORT, lead_page(None, None))
        .await
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(rows[0].lead.name, "Rajesh Kumar");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_project_title(pool: PgPool) {
    let project = create_project(&pool, "Sunrise Heights", "RERA-SH").await;
    let mut input = common::new_lead("Anita Rao");
    input.project_id = Some(project.id);
    LeadRepo::create(&pool, &input).await.unwrap();
    create_lead(&pool, "Someone Else").await;

    let filter = LeadFilter {
        search: Some("sunrise".to_string()),
        ..Default::default()
    };
    let (rows, _) = LeadRepo::search(&pool, &filter, DEFAULT_LEAD_SORT, lead_page(None, None))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].project_title.as_deref(), Some("Sunrise Heights"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overdue_only_keeps_past_follow_ups(pool: PgPool) {
    let overdue = create_lead(&pool, "Overdue Lead").await;
    let upcoming = create_lead(&pool, "Upcoming Lead").await;
    create_lead(&pool, "No Follow Up").await;

    sqlx::query("UPDATE leads SET next_follow_up = NOW() - INTERVAL '1 day' WHERE id = $1")
        .bind(overdue.id)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE leads SET next_follow_up = NOW() + INTERVAL '1 day' WHERE id = $1")
        .bind(upcoming.id)
        .execute(&pool)
        .await
        .unwrap();

    let filter = LeadFilter {
        overdue_only: true,
        ..Default::default()
    };
    let (rows, total) = LeadRepo::search(&pool, &filter, DEFAULT_LEAD_SORT, lead_page(None, None))
        .await
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(rows[0].lead.id, overdue.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unlisted_page_size_falls_back_to_default(pool: PgPool) {
    for i in 0..30 {
        create_lead(&pool, &format!("Lead {i:02}")).await;
    }

    let page = lead_page(Some(1), Some(37));
    assert_eq!(page.page_size, DEFAULT_LEAD_PAGE_SIZE);

    let (rows, total) = LeadRepo::search(&pool, &LeadFilter::default(), DEFAULT_LEAD_SORT, page)
        .await
        .unwrap();
    assert_eq!(rows.len(), 25);

    let meta = PageMeta::new(total, page);
    assert_eq!(meta.total, 30);
    assert_eq!(meta.total_pages, 2);
    assert!(meta.has_next);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_equality_filters(pool: PgPool) {
    let a = create_lead(&pool, "Urgent Lead").await;
    create_lead(&pool, "Calm Lead").await;
    LeadRepo::update(
        &pool,
        a.id,
        &UpdateLead {
            priority: Some("urgent".to_string()),
            ..Default::default()
        },
        None,
        chrono::Utc::now(),
    )
    .await
    .unwrap();

    let filter = LeadFilter {
        priority: Some("urgent".to_string()),
        status: Some("new".to_string()),
        ..Default::default()
    };
    let (rows, total) = LeadRepo::search(&pool, &filter, DEFAULT_LEAD_SORT, lead_page(None, None))
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].lead.id, a.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sort_by_name_and_unknown_key(pool: PgPool) {
    create_lead(&pool, "Bhavna").await;
    create_lead(&pool, "Arjun").await;
    create_lead(&pool, "Chetan").await;

    let by_name = SortKey::resolve(Some("name"), LEAD_SORT_FIELDS, DEFAULT_LEAD_SORT);
    let (rows, _) = LeadRepo::search(&pool, &LeadFilter::default(), by_name, lead_page(None, None))
        .await
        .unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.lead.name.as_str()).collect();
    assert_eq!(names, ["Arjun", "Bhavna", "Chetan"]);

    // Unknown keys fall back to newest first.
    let fallback = SortKey::resolve(Some("password"), LEAD_SORT_FIELDS, DEFAULT_LEAD_SORT);
    let (rows, _) = LeadRepo::search(&pool, &LeadFilter::default(), fallback, lead_page(None, None))
        .await
        .unwrap();
    assert_eq!(rows[0].lead.name, "Chetan");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_escapes_like_wildcards(pool: PgPool) {
    create_lead(&pool, "Percent Person").await;

    let filter = LeadFilter {
        search: Some("%".to_string()),
        ..Default::default()
    };
    let (rows, _) = LeadRepo::search(&pool, &filter, DEFAULT_LEAD_SORT, lead_page(None, None))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_listing_sort_and_filter(pool: PgPool) {
    create_project(&pool, "Zen Gardens", "RERA-Z").await;
    create_project(&pool, "Amber Court", "RERA-A").await;

    let sort = SortKey::resolve_with_order(
        Some("title"),
        Some("asc"),
        PROJECT_SORT_FIELDS,
        DEFAULT_PROJECT_SORT,
    );
    let page = PageRequest::resolve(None, None, &[10], 10);
    let (rows, total) = ProjectRepo::search(&pool, &ProjectFilter::default(), sort, page)
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(rows[0].title, "Amber Court");

    let filter = ProjectFilter {
        search: Some("zen".to_string()),
        ..Default::default()
    };
    let (rows, _) = ProjectRepo::search(&pool, &filter, sort, page).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].slug, "zen-gardens");
}
