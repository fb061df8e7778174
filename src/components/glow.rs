use std::rc::Rc;

use web_sys::Event;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::beam::anchor::HasBoundingBox;
use crate::beam::geometry::Rect;
use crate::config::{ENTRANCE_AMOUNT, GLOW_BAND};
use crate::web::current_viewport;

/// Whether a card centred at `center_y` (viewport pixels) is where the beam
/// currently passes.
pub fn is_lit(center_y: f64, viewport_height: f64) -> bool {
    if !(viewport_height > 0.0) {
        return false;
    }
    let (low, high) = GLOW_BAND;
    (low..=high).contains(&(center_y / viewport_height))
}

/// Whether at least `ENTRANCE_AMOUNT` of a card's height is on screen.
pub fn is_in_view(rect: &Rect, viewport_height: f64) -> bool {
    if !(rect.height > 0.0) || !(viewport_height > 0.0) {
        return false;
    }
    let visible = rect.bottom().min(viewport_height) - rect.top.max(0.0);
    visible / rect.height >= ENTRANCE_AMOUNT
}

fn measure(cards: &[NodeRef], previous: &[bool], rule: CardRule) -> Vec<bool> {
    let height = current_viewport().height;
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let hit = card
                .bounding_box()
                .map_or(false, |rect| (rule.test)(&rect, height));
            hit || (rule.latch && previous.get(i).copied().unwrap_or(false))
        })
        .collect()
}

/// How a card's flag follows its position. Latched flags never switch off.
#[derive(Clone, Copy)]
struct CardRule {
    test: fn(&Rect, f64) -> bool,
    latch: bool,
}

#[hook]
fn use_card_flags(cards: Rc<Vec<NodeRef>>, rule: CardRule) -> Vec<bool> {
    let flags = use_state_eq(|| vec![false; cards.len()]);

    let refresh = {
        let flags = flags.clone();
        let cards = cards.clone();
        move || flags.set(measure(&cards, &flags, rule))
    };

    {
        let refresh = refresh.clone();
        use_effect_with_deps(
            move |_| {
                refresh();
                || ()
            },
            (),
        );
    }

    {
        let refresh = refresh.clone();
        use_event_with_window("scroll", move |_: Event| refresh());
    }
    use_event_with_window("resize", move |_: Event| refresh());

    (*flags).clone()
}

/// Tracks which of `cards` sit inside the glow band, re-measured on scroll
/// and resize.
#[hook]
pub fn use_card_glow(cards: Rc<Vec<NodeRef>>) -> Vec<bool> {
    use_card_flags(
        cards,
        CardRule { test: |rect, height| is_lit(rect.center_y(), height), latch: false },
    )
}

/// Flips to `true` for each card the first time it scrolls into view.
#[hook]
pub fn use_card_entrance(cards: Rc<Vec<NodeRef>>) -> Vec<bool> {
    use_card_flags(cards, CardRule { test: is_in_view, latch: true })
}
