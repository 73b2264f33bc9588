//! Integration tests for the lead status workflow and note log.

mod common;

use chrono::{Duration, Utc};
use greenhomes_core::lead::format_note_entry;
use greenhomes_db::models::lead::{StatusChange, UpdateLead};
use greenhomes_db::repositories::LeadRepo;
use sqlx::PgPool;

use common::{create_admin, create_lead};

fn change_to(status: &str, actor_id: Option<i64>) -> StatusChange {
    StatusChange {
        status: status.to_string(),
        note: None,
        next_follow_up: None,
        actor_id,
        at: Utc::now(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_lead_defaults(pool: PgPool) {
    let lead = create_lead(&pool, "Amit").await;
    assert_eq!(lead.status, "new");
    assert_eq!(lead.priority, "medium");
    assert_eq!(lead.source, "contact_form");
    assert_eq!(lead.preferred_contact_method, "any");
    assert_eq!(lead.follow_up_count, 0);
    assert!(lead.contacted_at.is_none());
    assert_eq!(lead.notes, "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_entering_contacted_applies_side_effects_once(pool: PgPool) {
    let admin = create_admin(&pool, "priya@greenhomes.test", "Priya Admin").await;
    let lead = create_lead(&pool, "Rajesh Kumar").await;

    let change = change_to("contacted", Some(admin.id));
    let (contacted, old) = LeadRepo::change_status(&pool, lead.id, &change)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(old, "new");
    assert_eq!(contacted.status, "contacted");
    assert_eq!(contacted.follow_up_count, 1);
    assert_eq!(contacted.contacted_by, Some(admin.id));
    let stamped = contacted.contacted_at.expect("contacted_at set");
    assert!((stamped - change.at).num_milliseconds().abs() < 1);

    // Re-entering `contacted` leaves the bookkeeping untouched.
    let (again, old) = LeadRepo::change_status(&pool, lead.id, &change_to("contacted", None))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(old, "contacted");
    assert_eq!(again.follow_up_count, 1);
    assert_eq!(again.contacted_at, contacted.contacted_at);
    assert_eq!(again.contacted_by, Some(admin.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_leaving_and_reentering_contacted_counts_again(pool: PgPool) {
    let lead = create_lead(&pool, "Priya Sharma").await;

    LeadRepo::change_status(&pool, lead.id, &change_to("contacted", None))
        .await
        .unwrap();
    LeadRepo::change_status(&pool, lead.id, &change_to("qualified", None))
        .await
        .unwrap();
    let (lead, _) = LeadRepo::change_status(&pool, lead.id, &change_to("contacted", None))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(lead.follow_up_count, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_transitions_are_plain_assignments(pool: PgPool) {
    let lead = create_lead(&pool, "Closed Fast").await;

    let (closed, _) = LeadRepo::change_status(&pool, lead.id, &change_to("closed", None))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(closed.status, "closed");
    assert_eq!(closed.follow_up_count, 0);
    assert!(closed.contacted_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_into_contacted_matches_status_endpoint(pool: PgPool) {
    let admin = create_admin(&pool, "ravi@greenhomes.test", "Ravi").await;
    let lead = create_lead(&pool, "Patch Me").await;

    let input = UpdateLead {
        status: Some("contacted".to_string()),
        priority: Some("high".to_string()),
        ..Default::default()
    };
    let updated = LeadRepo::update(&pool, lead.id, &input, Some(admin.id), Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, "contacted");
    assert_eq!(updated.priority, "high");
    assert_eq!(updated.follow_up_count, 1);
    assert!(updated.contacted_at.is_some());

    // Same status again through the edit path: no second increment.
    let updated = LeadRepo::update(&pool, lead.id, &input, Some(admin.id), Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.follow_up_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_change_note_is_appended(pool: PgPool) {
    let lead = create_lead(&pool, "Noted Lead").await;

    let mut change = change_to("qualified", None);
    change.note = Some("Budget confirmed".to_string());
    let (lead, _) = LeadRepo::change_status(&pool, lead.id, &change)
        .await
        .unwrap()
        .unwrap();

    assert!(lead
        .notes
        .ends_with("Status changed from 'new' to 'qualified': Budget confirmed"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_notes_only_grow(pool: PgPool) {
    let lead = create_lead(&pool, "Chatty Lead").await;
    let now = Utc::now();

    let first = format_note_entry(now, "Priya Admin", "Called, no answer");
    let second = format_note_entry(now, "Priya Admin", "Sent brochure on WhatsApp");
    let follow_up = now + Duration::days(2);

    LeadRepo::append_note(&pool, lead.id, &first, None).await.unwrap();
    let lead = LeadRepo::append_note(&pool, lead.id, &second, Some(follow_up))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(lead.notes, format!("{first}{second}"));
    let stored = lead.next_follow_up.expect("follow-up scheduled");
    assert!((stored - follow_up).num_milliseconds().abs() < 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_workflow_on_missing_lead_returns_none(pool: PgPool) {
    assert!(LeadRepo::change_status(&pool, 999, &change_to("contacted", None))
        .await
        .unwrap()
        .is_none());
    assert!(LeadRepo::append_note(&pool, 999, "\n[x] y: z", None)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_lead_rejects_workflow_changes(pool: PgPool) {
    let lead = create_lead(&pool, "Deleted Lead").await;
    LeadRepo::soft_delete(&pool, lead.id).await.unwrap();

    assert!(LeadRepo::change_status(&pool, lead.id, &change_to("contacted", None))
        .await
        .unwrap()
        .is_none());
}
