//! Tests for the stack's wakeup signal.

use sheet_stack::wakeup;
use sheet_stack::{Sheet, SheetBinder, SheetStack, StackConfig};

#[derive(Debug, Clone, PartialEq)]
struct Card(u8);

impl Sheet for Card {
    type Id = u8;

    fn id(&self) -> u8 {
        self.0
    }
}

#[tokio::test]
async fn test_push_wakes_receiver() {
    let stack: SheetStack<Card> = SheetStack::new();
    let (tx, mut rx) = wakeup::channel();
    stack.install_wakeup(tx);

    stack.push(Card(1));
    assert_eq!(rx.recv().await, Some(()));
    assert!(!rx.try_recv());
}

#[tokio::test]
async fn test_each_effective_mutation_signals() {
    let stack: SheetStack<Card> = SheetStack::new();
    let (tx, mut rx) = wakeup::channel();
    stack.install_wakeup(tx);

    stack.push(Card(1));
    stack.push(Card(2));
    stack.pop();
    stack.pop();
    stack.pop();
    assert_eq!(rx.drain(), 4);
}

#[tokio::test]
async fn test_burst_is_coalesced_by_capacity() {
    let stack: SheetStack<Card> = SheetStack::new();
    let (tx, mut rx) = wakeup::with_capacity(2);
    stack.install_wakeup(tx);

    for id in 0..10 {
        stack.push(Card(id));
    }
    assert_eq!(rx.drain(), 2);
    assert_eq!(stack.count(), 10);
}

#[test]
fn test_pop_on_empty_does_not_wake() {
    let stack: SheetStack<Card> = SheetStack::new();
    let (tx, mut rx) = wakeup::channel();
    stack.install_wakeup(tx);

    stack.pop();
    assert!(!rx.try_recv());
}

#[test]
fn test_disabled_wakeup_is_silent() {
    let stack: SheetStack<Card> =
        SheetStack::with_config(StackConfig::default().name("quiet").without_wakeup());
    let (tx, mut rx) = wakeup::channel();
    stack.install_wakeup(tx);

    stack.push(Card(1));
    assert!(!rx.try_recv());
}

#[test]
fn test_dropped_receiver_is_tolerated() {
    let stack: SheetStack<Card> = SheetStack::new();
    let (tx, rx) = wakeup::channel();
    stack.install_wakeup(tx);
    drop(rx);

    stack.push(Card(1));
    stack.pop();
    assert!(stack.is_empty());
}

#[test]
fn test_binder_collapse_wakes_per_pop() {
    let stack: SheetStack<Card> = SheetStack::new();
    let root = SheetBinder::attach(&stack, |card: &Card| card.0);
    root.set_observed(Some(Card(1))).unwrap();
    stack.push(Card(2));
    stack.push(Card(3));

    let (tx, mut rx) = wakeup::channel();
    stack.install_wakeup(tx);
    root.dismiss();

    assert!(stack.is_empty());
    assert_eq!(rx.drain(), 3);
}
