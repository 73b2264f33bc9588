//! Integration tests for the bulk-action repository primitives.

mod common;

use greenhomes_db::repositories::{FeaturedProjectRepo, LeadRepo, ProjectRepo};
use sqlx::PgPool;

use common::{create_admin, create_lead, create_project};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_change_status_skips_missing_ids(pool: PgPool) {
    let a = create_lead(&pool, "Lead A").await;
    let b = create_lead(&pool, "Lead B").await;

    let updated = LeadRepo::bulk_set_status(&pool, &[a.id, b.id, 999], "qualified")
        .await
        .unwrap();
    assert_eq!(updated, 2);

    for id in [a.id, b.id] {
        let lead = LeadRepo::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(lead.status, "qualified");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_move_into_contacted_skips_contact_bookkeeping(pool: PgPool) {
    let lead = create_lead(&pool, "Lead C").await;

    LeadRepo::bulk_set_status(&pool, &[lead.id], "contacted")
        .await
        .unwrap();

    let lead = LeadRepo::find_by_id(&pool, lead.id).await.unwrap().unwrap();
    assert_eq!(lead.status, "contacted");
    assert_eq!(lead.follow_up_count, 0);
    assert!(lead.contacted_at.is_none());
    assert!(lead.contacted_by.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_delete_then_restore_counts_scope(pool: PgPool) {
    let a = create_lead(&pool, "Lead A").await;
    let b = create_lead(&pool, "Lead B").await;
    LeadRepo::soft_delete(&pool, a.id).await.unwrap();

    // Only `b` is still active.
    assert_eq!(LeadRepo::count_in_scope(&pool, &[a.id, b.id], false).await.unwrap(), 1);
    assert_eq!(LeadRepo::bulk_soft_delete(&pool, &[a.id, b.id]).await.unwrap(), 1);

    assert_eq!(LeadRepo::count_in_scope(&pool, &[a.id, b.id], true).await.unwrap(), 2);
    assert_eq!(LeadRepo::bulk_restore(&pool, &[a.id, b.id]).await.unwrap(), 2);
    assert_eq!(LeadRepo::bulk_restore(&pool, &[a.id, b.id]).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_priority_and_assignment(pool: PgPool) {
    let admin = create_admin(&pool, "sales@greenhomes.test", "Sales Desk").await;
    let a = create_lead(&pool, "Lead A").await;
    let b = create_lead(&pool, "Lead B").await;

    assert_eq!(
        LeadRepo::bulk_set_priority(&pool, &[a.id, b.id], "urgent").await.unwrap(),
        2
    );
    assert_eq!(
        LeadRepo::bulk_assign_contact(&pool, &[a.id], admin.id).await.unwrap(),
        1
    );

    let a = LeadRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert_eq!(a.priority, "urgent");
    assert_eq!(a.contacted_by, Some(admin.id));
    // Assignment is not a status transition.
    assert_eq!(a.follow_up_count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refeaturing_appends_to_the_end(pool: PgPool) {
    let first = create_project(&pool, "First", "RERA-1").await;
    let second = create_project(&pool, "Second", "RERA-2").await;

    FeaturedProjectRepo::feature(&pool, first.id).await.unwrap();
    FeaturedProjectRepo::feature(&pool, second.id).await.unwrap();
    assert!(FeaturedProjectRepo::unfeature(&pool, first.id).await.unwrap());
    FeaturedProjectRepo::feature(&pool, first.id).await.unwrap();

    let order: Vec<i64> = FeaturedProjectRepo::list_active(&pool, 6)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.project_id)
        .collect();
    assert_eq!(order, vec![second.id, first.id]);

    let first = ProjectRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert!(first.is_featured);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_featuring_twice_keeps_position(pool: PgPool) {
    let project = create_project(&pool, "Stable", "RERA-9").await;
    FeaturedProjectRepo::feature(&pool, project.id).await.unwrap();
    let before = FeaturedProjectRepo::find_by_project(&pool, project.id)
        .await
        .unwrap()
        .unwrap();

    FeaturedProjectRepo::feature(&pool, project.id).await.unwrap();
    let after = FeaturedProjectRepo::find_by_project(&pool, project.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(before.id, after.id);
    assert_eq!(before.display_order, after.display_order);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_projects_drop_out_of_featured_list(pool: PgPool) {
    let project = create_project(&pool, "Soon Gone", "RERA-5").await;
    FeaturedProjectRepo::feature(&pool, project.id).await.unwrap();

    ProjectRepo::bulk_soft_delete(&pool, &[project.id]).await.unwrap();

    assert!(FeaturedProjectRepo::list_active(&pool, 6).await.unwrap().is_empty());
    assert_eq!(FeaturedProjectRepo::list_all(&pool).await.unwrap().len(), 1);
}
