use std::sync::Arc;

use iot_fridge::domain::CanCounts;
use iot_fridge::{Config, Error, Flavor, LedgerEventFlag, Role, Workflow};
use rust_decimal::Decimal;

fn workflow(stock: CanCounts) -> (Workflow<Arc<LedgerEventFlag>>, Arc<LedgerEventFlag>) {
    let flag = Arc::new(LedgerEventFlag::new());
    let config = Config {
        initial_stock: stock,
        ..Config::default()
    };
    (Workflow::new(&config, Arc::clone(&flag)), flag)
}

#[test]
fn escrow_is_a_pass_through_over_a_mission() {
    let (wf, _) = workflow(CanCounts::new(4, 1, 0));
    let escrow_before = wf.balance(Role::Escrow);

    wf.dispatch("agree_to_restock", None).unwrap();
    assert_eq!(wf.balance(Role::Subscriber), Decimal::new(6, 0));
    assert_eq!(wf.balance(Role::Escrow), Decimal::new(4, 0));

    let outcome = wf.dispatch("complete_restock", None).unwrap();
    assert_eq!(outcome.cans_added, 3);
    assert_eq!(wf.balance(Role::Escrow), escrow_before);
    assert_eq!(wf.display_balance(Role::Subscriber), "10.30");
}

#[test]
fn taking_a_red_can_charges_its_price() {
    let (wf, flag) = workflow(CanCounts::new(4, 2, 2));

    let outcome = wf.dispatch("take_can", Some("red_can")).unwrap();

    assert_eq!(outcome.snapshot.contents.red, 3);
    assert_eq!(outcome.snapshot.display_balance(Role::Fridge), "25.30");
    assert!(flag.consume());
    assert!(!flag.consume());
}

#[test]
fn unknown_flavor_is_a_client_error() {
    let (wf, flag) = workflow(CanCounts::new(4, 2, 2));
    let before = wf.snapshot();

    let err = wf.dispatch("take_can", Some("purple_can")).unwrap_err();

    assert!(matches!(err, Error::InvalidFlavor(_)));
    assert!(err.is_client_error());
    assert_eq!(wf.snapshot(), before);
    assert!(!flag.consume());
}

#[test]
fn selling_out_a_flavor_flags_restock() {
    let (wf, _) = workflow(CanCounts::new(4, 2, 2));

    assert!(!wf.needs_restock());
    wf.take_can(Flavor::Green);
    assert!(wf.needs_restock());
    wf.take_can(Flavor::Green);
    wf.take_can(Flavor::Green);
    assert_eq!(wf.contents().green, 0);

    let outcome = wf.restock();
    assert_eq!(outcome.cans_added, 2);
    assert!(!wf.needs_restock());
}
