//! End-to-end wagering flows against SQLite and in-memory stores.

mod harness;

use std::sync::Arc;

use harness::temp_db::TempDb;
use wagerbook::adapter::outbound::memory::MemoryWagerStore;
use wagerbook::application::wager::service::WagerService;
use wagerbook::domain::error::DomainError;
use wagerbook::domain::payout::PayoutPlan;
use wagerbook::domain::poll::{Choice, PollStatus};
use wagerbook::error::Error;
use wagerbook::port::outbound::store::{BetStore, WagerStore};
use wagerbook::testkit::domain::{poll_id, reference_bets, user};

fn domain_error(result: Result<impl std::fmt::Debug, Error>) -> DomainError {
    match result {
        Err(Error::Domain(err)) => err,
        other => panic!("expected a domain error, got {other:?}"),
    }
}

async fn reference_flow<S: WagerStore>(service: &WagerService<S>) {
    let poll = service
        .create_poll(&user("carol"), "Will it rain?", "Yes", "No")
        .await
        .unwrap();

    service.place_bet(&user("user1"), poll.id(), 100, Choice::A).await.unwrap();
    service.place_bet(&user("user2"), poll.id(), 100, Choice::B).await.unwrap();
    service.place_bet(&user("user3"), poll.id(), 50, Choice::A).await.unwrap();

    let stored = service.poll(poll.id()).await.unwrap();
    assert_eq!(stored.total_points_a(), 150);
    assert_eq!(stored.total_points_b(), 100);

    let preview = service.preview_payout(poll.id(), Choice::A).await.unwrap();
    let settlement = service
        .resolve_poll(&user("carol"), poll.id(), Choice::A)
        .await
        .unwrap();

    assert_eq!(settlement.plan, preview);
    assert_eq!(settlement.poll.status(), PollStatus::ResolvedA);
    assert!(settlement.poll.resolved_at().is_some());
    assert_eq!(settlement.plan.total_pool(), 250);
    assert_eq!(settlement.plan.winning_total(), 150);
    assert_eq!(settlement.plan.distributed(), 249);
    assert_eq!(settlement.plan.dust(), 1);

    assert_eq!(service.balance(&user("user1")).await.unwrap(), 566);
    assert_eq!(service.balance(&user("user2")).await.unwrap(), 400);
    assert_eq!(service.balance(&user("user3")).await.unwrap(), 533);

    let again = service
        .resolve_poll(&user("carol"), poll.id(), Choice::B)
        .await;
    assert!(matches!(
        domain_error(again),
        DomainError::AlreadyResolved { .. }
    ));
    assert_eq!(service.balance(&user("user1")).await.unwrap(), 566);
    assert!(service.audit().await.unwrap().is_empty());
}

#[tokio::test]
async fn reference_flow_on_sqlite() {
    let db = TempDb::create("reference");
    reference_flow(&db.service(500)).await;
}

#[tokio::test]
async fn reference_flow_in_memory() {
    let service = WagerService::new(Arc::new(MemoryWagerStore::new()), 500);
    reference_flow(&service).await;
}

#[tokio::test]
async fn state_survives_reopening_the_database() {
    let db = TempDb::create("reopen");
    let poll = {
        let service = db.service(500);
        let poll = service
            .create_poll(&user("carol"), "Persist?", "Yes", "No")
            .await
            .unwrap();
        service.place_bet(&user("dave"), poll.id(), 120, Choice::B).await.unwrap();
        poll
    };

    let service = db.service(500);
    assert_eq!(service.balance(&user("dave")).await.unwrap(), 380);
    let reloaded = service.poll(poll.id()).await.unwrap();
    assert_eq!(reloaded.total_points_b(), 120);
    assert_eq!(reloaded.title(), "Persist?");
    assert_eq!(service.bets_for_user(&user("dave")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn preview_is_computed_from_recorded_bets() {
    let db = TempDb::create("preview");
    let store = db.store();
    let service = WagerService::new(Arc::new(store), 500);
    let poll = service
        .create_poll(&user("carol"), "Q", "Yes", "No")
        .await
        .unwrap();
    for bet in reference_bets(poll.id()) {
        service
            .place_bet(bet.user_id(), poll.id(), bet.amount(), bet.choice())
            .await
            .unwrap();
    }

    let bets = service.store().bets_for_poll(poll.id()).await.unwrap();
    let expected = PayoutPlan::compute(poll.id(), Choice::A, &bets);

    assert_eq!(service.preview_payout(poll.id(), Choice::A).await.unwrap(), expected);
    assert!(service.poll(poll.id()).await.unwrap().is_active());
}

#[tokio::test]
async fn no_winner_resolution_burns_the_pool() {
    let db = TempDb::create("burn");
    let service = db.service(500);
    let poll = service
        .create_poll(&user("carol"), "Q", "Yes", "No")
        .await
        .unwrap();
    service.place_bet(&user("a"), poll.id(), 100, Choice::A).await.unwrap();
    service.place_bet(&user("b"), poll.id(), 40, Choice::A).await.unwrap();

    let settlement = service
        .resolve_poll(&user("carol"), poll.id(), Choice::B)
        .await
        .unwrap();

    assert_eq!(settlement.poll.status(), PollStatus::ResolvedB);
    assert!(settlement.plan.payouts().is_empty());
    assert_eq!(settlement.plan.dust(), 140);
    assert_eq!(service.balance(&user("a")).await.unwrap(), 400);
    assert_eq!(service.balance(&user("b")).await.unwrap(), 460);
}

#[tokio::test]
async fn rejected_bets_leave_no_trace() {
    let db = TempDb::create("rejected");
    let service = db.service(100);
    let poll = service
        .create_poll(&user("carol"), "Q", "Yes", "No")
        .await
        .unwrap();

    let over = service.place_bet(&user("u"), poll.id(), 101, Choice::A).await;
    assert!(matches!(
        domain_error(over),
        DomainError::InsufficientFunds {
            requested: 101,
            available: 100,
            ..
        }
    ));
    let zero = service.place_bet(&user("u"), poll.id(), 0, Choice::A).await;
    assert!(matches!(domain_error(zero), DomainError::InvalidAmount { amount: 0 }));
    let missing = service.place_bet(&user("u"), &poll_id("nope"), 5, Choice::A).await;
    assert!(matches!(domain_error(missing), DomainError::NotFound { .. }));

    assert_eq!(service.balance(&user("u")).await.unwrap(), 100);
    assert!(service.bets_for_poll(poll.id()).await.unwrap().is_empty());
    assert_eq!(service.poll(poll.id()).await.unwrap().total_pool(), 0);
}

#[tokio::test]
async fn non_creator_cannot_resolve_on_sqlite() {
    let db = TempDb::create("creator");
    let service = db.service(500);
    let poll = service
        .create_poll(&user("carol"), "Q", "Yes", "No")
        .await
        .unwrap();

    let result = service.resolve_poll(&user("mallory"), poll.id(), Choice::A).await;

    assert!(matches!(domain_error(result), DomainError::NotCreator { .. }));
    assert!(service.poll(poll.id()).await.unwrap().is_active());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bets_never_overdraw_on_sqlite() {
    let db = TempDb::create("concurrent");
    let service = Arc::new(db.service(300));
    let poll = service
        .create_poll(&user("carol"), "Q", "Yes", "No")
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = Arc::clone(&service);
        let poll_id = poll.id().clone();
        let choice = if i % 2 == 0 { Choice::A } else { Choice::B };
        handles.push(tokio::spawn(async move {
            service.place_bet(&user("greedy"), &poll_id, 100, choice).await
        }));
    }

    let mut placed = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            placed += 1;
        }
    }

    assert_eq!(placed, 3);
    assert_eq!(service.balance(&user("greedy")).await.unwrap(), 0);
    assert_eq!(service.poll(poll.id()).await.unwrap().total_pool(), 300);
    assert!(service.audit().await.unwrap().is_empty());
}

#[tokio::test]
async fn polls_list_in_creation_order_on_sqlite() {
    let db = TempDb::create("order");
    let service = db.service(500);
    for title in ["first", "second", "third"] {
        service
            .create_poll(&user("carol"), title, "Yes", "No")
            .await
            .unwrap();
    }

    let titles: Vec<String> = service
        .polls()
        .await
        .unwrap()
        .iter()
        .map(|p| p.title().to_string())
        .collect();

    assert_eq!(titles, ["first", "second", "third"]);
}
