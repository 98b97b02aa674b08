//! End-to-end cart scenarios over an in-memory store

use std::sync::Arc;

use neoncart::pricing::{cart_count, cart_total};
use neoncart::rendering::{BadgeElement, BadgePresenter, BadgeSlot, CartTable, Cell, Row};
use neoncart::storage::{MemoryStorage, Storage};
use neoncart::{CartConfig, CartLine, CartStore, Layout, Mode, ProductRef, RenderContext};

fn widget() -> ProductRef {
    ProductRef::new("p1", "Widget", 100.0)
}

fn new_store() -> CartStore<MemoryStorage> {
    CartStore::new(MemoryStorage::new(), &CartConfig::default())
}

#[test]
fn empty_storage_renders_empty_state() {
    let store = new_store();
    assert!(store.get_cart().is_empty());

    let mut table = CartTable::new(RenderContext::default(), &CartConfig::default());
    let view = table.render(&store);
    assert!(view.is_empty_state());
    assert_eq!(
        view.rows,
        vec![Row::Empty {
            colspan: 3,
            message: "Košík je prázdný. Přidej si něco z produktů 🙂".into(),
        }]
    );
    assert_eq!(view.total, "0 Kč");
}

#[test]
fn adding_same_product_twice() {
    let config = CartConfig::default();
    let mut store = CartStore::new(MemoryStorage::new(), &config);
    let slot = Arc::new(BadgeSlot::new());
    let badge = BadgePresenter::new(Some(slot.clone() as Arc<dyn BadgeElement>), &config.messages);
    let observer = badge.clone();
    store.on_change(move |cart| observer.refresh(cart));

    store.add_to_cart(&widget());
    store.add_to_cart(&widget());

    let cart = store.get_cart();
    assert_eq!(
        cart,
        vec![CartLine {
            id: "p1".into(),
            name: "Widget".into(),
            price: 100.0,
            qty: 2,
        }]
    );
    assert_eq!(cart_total(&cart), 200.0);
    assert_eq!(slot.state().text, "🛒 2");
    assert_eq!(slot.state().aria_label, "Košík, 2 položek");
}

#[test]
fn add_is_count_additive() {
    let mut store = new_store();
    store.add_to_cart(&widget());

    let before = store.get_cart();
    store.add_to_cart(&ProductRef::new("p2", "Gadget", 20.0));
    let after = store.get_cart();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(cart_count(&after), cart_count(&before) + 1);

    store.add_to_cart(&ProductRef::new("p2", "Gadget", 20.0));
    let again = store.get_cart();
    assert_eq!(again.len(), after.len());
    assert_eq!(again[1].qty, after[1].qty + 1);
}

#[test]
fn set_qty_clamps_both_ends() {
    let mut store = new_store();
    store.add_to_cart(&widget());

    store.set_qty("p1", &150.0);
    assert_eq!(store.get_cart()[0].qty, 99);

    store.set_qty("p1", &-5.0);
    assert_eq!(store.get_cart()[0].qty, 1);

    store.set_qty("p1", "not a number");
    assert_eq!(store.get_cart()[0].qty, 1);
}

#[test]
fn removing_last_line_empties_table() {
    let mut store = new_store();
    store.add_to_cart(&widget());
    store.remove_item("p1");
    assert!(store.get_cart().is_empty());

    let mut table = CartTable::new(
        RenderContext::new(Layout::Np, Mode::Static),
        &CartConfig::default(),
    );
    let view = table.render(&store);
    assert!(view.is_empty_state());
    assert_eq!(view.total, "0 Kč");
}

#[test]
fn save_then_get_round_trips() {
    let mut store = new_store();
    let cart = vec![
        CartLine { id: "a".into(), name: "Alpha".into(), price: 12.75, qty: 3 },
        CartLine { id: "b".into(), name: "Beta".into(), price: 1500.0, qty: 99 },
    ];
    let _ = store.get_cart();
    store.save_cart(&cart);
    assert_eq!(store.get_cart(), cart);
}

#[test]
fn corrupt_storage_degrades_to_empty() {
    for raw in ["", "{", "42", "{\"id\":\"p1\"}", "[1, \"two\", null]"] {
        let storage = MemoryStorage::new().with_item(neoncart::DEFAULT_STORAGE_KEY, raw);
        let store = CartStore::new(storage, &CartConfig::default());
        assert!(store.get_cart().is_empty(), "raw {:?} should load empty", raw);
    }
}

#[test]
fn malformed_lines_never_break_totals() {
    let raw = r#"[
        {"id":"a","name":"A","price":"abc","qty":2},
        {"id":"b","name":"B","price":50,"qty":"x"},
        {"id":"c","name":"C","price":-20,"qty":1},
        {"id":"d","name":"D","price":"10","qty":"3"}
    ]"#;
    let storage = MemoryStorage::new().with_item(neoncart::DEFAULT_STORAGE_KEY, raw);
    let store = CartStore::new(storage, &CartConfig::default());
    let cart = store.get_cart();
    assert_eq!(cart.len(), 4);
    assert_eq!(cart_count(&cart), 6);
    assert_eq!(cart_total(&cart), 30.0);
}

#[test]
fn layouts_render_expected_columns() {
    let mut store = new_store();
    store.add_to_cart(&widget());
    let config = CartConfig::default();

    let cases = [
        (Layout::Np, Mode::Static, 2),
        (Layout::Nqp, Mode::Static, 3),
        (Layout::Npq, Mode::Static, 3),
        (Layout::Np, Mode::Editable, 3),
        (Layout::Nqp, Mode::Editable, 3),
        (Layout::Npq, Mode::Editable, 3),
    ];
    for (layout, mode, columns) in cases {
        let mut table = CartTable::new(RenderContext::new(layout, mode), &config);
        let view = table.render(&store);
        let cells = view.rows[0].cells();
        assert_eq!(cells.len(), columns, "{:?}/{:?}", layout, mode);
        let interactive = cells.iter().any(Cell::is_interactive);
        assert_eq!(interactive, mode == Mode::Editable, "{:?}/{:?}", layout, mode);
    }
}

#[test]
fn independent_sections_share_storage_state() {
    let config = CartConfig::default();
    let mut store = CartStore::new(MemoryStorage::new(), &config);
    let mut summary = CartTable::new(RenderContext::new(Layout::Nqp, Mode::Static), &config);
    let mut editor = CartTable::new(RenderContext::new(Layout::Npq, Mode::Editable), &config);

    store.add_to_cart(&widget());
    summary.render(&store);
    editor.render(&store);

    store.set_qty("p1", "5");
    assert_eq!(summary.render(&store).total, "500 Kč");
    assert_eq!(editor.render(&store).total, "500 Kč");

    // The raw storage holds the same list the pages write
    let raw = store.storage().get_item(store.key()).unwrap().unwrap();
    assert_eq!(raw, r#"[{"id":"p1","name":"Widget","price":100,"qty":5}]"#);
}
