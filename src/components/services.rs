use std::rc::Rc;

use log::info;
use yew::prelude::*;

use crate::beam::{AnchorRole, AnchorSet, SectionId};
use crate::components::glow::use_card_glow;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Align {
    Left,
    Right,
}

struct Service {
    icon: &'static str,
    title: &'static str,
    desc: &'static str,
    align: Align,
}

const SERVICES: [Service; 4] = [
    Service {
        icon: "🏠",
        title: "Impianti Residenziali",
        desc: "Sistemi domotici intelligenti e gestione carichi per la massima sicurezza e comfort in casa.",
        align: Align::Left,
    },
    Service {
        icon: "🏭",
        title: "Settore Industriale",
        desc: "Automazione, power center e manutenzione predittiva per la continuità operativa.",
        align: Align::Right,
    },
    Service {
        icon: "🛡️",
        title: "Sicurezza & TVCC",
        desc: "Sistemi antintrusione connessi e videosorveglianza IP ad alta risoluzione.",
        align: Align::Left,
    },
    Service {
        icon: "🔌",
        title: "Automazione Domotica",
        desc: "Integrazione completa di riscaldamento, clima, sicurezza e multimedia.",
        align: Align::Right,
    },
];

/// Teaser shown beside a card on wide screens.
fn teaser(desc: &str) -> String {
    let cut: String = desc.chars().take(50).collect();
    format!("{}...", cut)
}

#[derive(Properties, PartialEq)]
pub struct ServicesSceneProps {
    pub on_ready: Callback<AnchorSet>,
}

#[function_component(ServicesScene)]
pub fn services_scene(props: &ServicesSceneProps) -> Html {
    let section = use_node_ref();
    let markers = use_state(|| (0..SERVICES.len()).map(|_| NodeRef::default()).collect::<Vec<_>>());
    let cards = use_state(|| Rc::new((0..SERVICES.len()).map(|_| NodeRef::default()).collect::<Vec<_>>()));
    let glow = use_card_glow((*cards).clone());

    // Report anchors once the first layout pass is done
    {
        let on_ready = props.on_ready.clone();
        let section = section.clone();
        let markers = markers.clone();
        use_effect_with_deps(
            move |_| {
                let set = AnchorSet::from_node_refs(
                    SectionId::Services,
                    AnchorRole::BoundaryStart,
                    &section,
                    &markers,
                );
                info!("services anchors ready: {} waypoints", set.waypoints.len());
                on_ready.emit(set);
                || ()
            },
            (),
        );
    }

    html! {
        <section ref={section} id="servizi" class="services">
            <style>
                {r#"
                    .services { padding: 6rem 1.5rem; background: #020617; position: relative; overflow: hidden; }
                    .services-header { text-align: center; max-width: 56rem; margin: 0 auto 5rem; }
                    .services-grid { display: grid; grid-template-columns: 1fr; gap: 4rem; max-width: 64rem; margin: 0 auto; }
                    .service-slot { display: flex; align-items: center; }
                    .service-card { position: relative; display: flex; flex-direction: column; padding: 2rem;
                        width: 100%; max-width: 28rem; border-radius: 0.75rem; border: 1px solid #1e293b;
                        background: #0f172a; transition: box-shadow 0.5s, border-color 0.5s; }
                    .service-card.muted { background: rgba(15, 23, 42, 0.5); }
                    .service-card.lit { box-shadow: 0 0 40px 10px rgba(255, 234, 0, 0.6); border-color: #FACC15; }
                    .service-icon { font-size: 2rem; padding: 1rem; border-radius: 9999px;
                        background: rgba(250, 204, 21, 0.1); margin-bottom: 1.5rem; align-self: flex-start; }
                    .service-icon.end { align-self: flex-end; }
                    .service-teaser { display: none; }
                    .beam-marker { position: absolute; width: 1rem; height: 1rem; top: 50%; left: 50%;
                        transform: translate(-50%, -50%); pointer-events: none; }
                    @media (min-width: 1024px) {
                        .services-grid { grid-template-columns: 1fr 1fr; }
                        .service-slot.left { justify-content: flex-end; }
                        .service-slot.right { order: 2; justify-content: flex-start; }
                        .service-teaser { display: flex; align-items: center; height: 100%; }
                        .service-teaser.left { order: 2; justify-content: flex-start; }
                        .service-teaser.right { order: 1; justify-content: flex-end; }
                        .service-teaser p { max-width: 20rem; padding: 1rem; border-left: 4px solid rgba(250, 204, 21, 0.5); }
                    }
                "#}
            </style>
            <div class="services-header">
                <p class="eyebrow">{"⚡ Progetti Core"}</p>
                <h2>{"Tecnologia, Sicurezza, Efficienza."}</h2>
            </div>
            <div class="services-grid">
                { for SERVICES.iter().enumerate().map(|(i, service)| {
                    let side = if service.align == Align::Left { "left" } else { "right" };
                    let card_class = classes!(
                        "service-card",
                        (service.align == Align::Right).then(|| "muted"),
                        glow.get(i).copied().unwrap_or(false).then(|| "lit"),
                    );
                    let icon_class = classes!(
                        "service-icon",
                        (service.align == Align::Right).then(|| "end"),
                    );
                    html! {
                        <>
                            <div class={classes!("service-slot", side)}>
                                <div ref={cards[i].clone()} class={card_class}>
                                    <div class={icon_class}>{service.icon}</div>
                                    <h3>{service.title}</h3>
                                    <p>{service.desc}</p>
                                    <a href="#contatti" class="service-link">{"Scopri ›"}</a>
                                    <div ref={markers[i].clone()} class="beam-marker"></div>
                                </div>
                            </div>
                            <div class={classes!("service-teaser", side)}>
                                <p>{teaser(service.desc)}</p>
                            </div>
                        </>
                    }
                }) }
            </div>
        </section>
    }
}
