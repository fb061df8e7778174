use std::rc::Rc;

use log::info;
use yew::prelude::*;

use crate::beam::{AnchorRole, AnchorSet, SectionId};
use crate::components::glow::{use_card_entrance, use_card_glow};

struct Benefit {
    icon: &'static str,
    title: &'static str,
    desc: &'static str,
}

const BENEFITS: [Benefit; 4] = [
    Benefit {
        icon: "📋",
        title: "Certificazione Garantita",
        desc: "Impianti rilasciati con DiCo secondo le normative CEI in vigore.",
    },
    Benefit {
        icon: "📈",
        title: "Efficienza Massima",
        desc: "Utilizzo di componenti ad alta efficienza per minimizzare i consumi.",
    },
    Benefit {
        icon: "🧩",
        title: "Soluzioni Chiavi in Mano",
        desc: "Gestione completa del progetto dalla progettazione alla messa in opera.",
    },
    Benefit {
        icon: "👷",
        title: "Team Qualificato",
        desc: "Tecnici costantemente aggiornati sulle ultime tecnologie e protocolli.",
    },
];

/// Staggered entrance delay for the card at `index`, in seconds.
fn entrance_delay(index: usize) -> f64 {
    index as f64 * 0.1
}

#[derive(Properties, PartialEq)]
pub struct BenefitsSceneProps {
    pub on_ready: Callback<AnchorSet>,
}

#[function_component(BenefitsScene)]
pub fn benefits_scene(props: &BenefitsSceneProps) -> Html {
    let exit = use_node_ref();
    let markers = use_state(|| (0..BENEFITS.len()).map(|_| NodeRef::default()).collect::<Vec<_>>());
    let cards = use_state(|| Rc::new((0..BENEFITS.len()).map(|_| NodeRef::default()).collect::<Vec<_>>()));
    let glow = use_card_glow((*cards).clone());
    let entered = use_card_entrance((*cards).clone());

    {
        let on_ready = props.on_ready.clone();
        let exit = exit.clone();
        let markers = markers.clone();
        use_effect_with_deps(
            move |_| {
                let set = AnchorSet::from_node_refs(
                    SectionId::Benefits,
                    AnchorRole::BoundaryEnd,
                    &exit,
                    &markers,
                );
                info!("benefits anchors ready: {} waypoints", set.waypoints.len());
                on_ready.emit(set);
                || ()
            },
            (),
        );
    }

    html! {
        <section id="vantaggi" class="benefits">
            <style>
                {r#"
                    .benefits { padding: 6rem 1.5rem; background: #0f172a; }
                    .benefits-grid { display: grid; gap: 3rem; align-items: center; max-width: 72rem; margin: 0 auto; }
                    .benefits-list { position: relative; display: flex; flex-direction: column; gap: 1.5rem; }
                    .benefit-card { position: relative; display: flex; align-items: flex-start; padding: 1.5rem;
                        background: #0f172a; border-radius: 0.75rem; border: 1px solid #1e293b;
                        opacity: 0; transition: box-shadow 0.4s, border-color 0.4s; }
                    .benefit-card.entered { animation: benefit-in 0.7s ease-out both; }
                    .benefit-card.lit { box-shadow: 0 0 30px 5px rgba(255, 234, 0, 0.4); border-color: #FACC15; }
                    .benefit-icon { font-size: 1.5rem; padding: 0.75rem; margin-right: 1rem; border-radius: 9999px;
                        background: rgba(250, 204, 21, 0.1); flex-shrink: 0; }
                    .benefit-marker { position: absolute; width: 0.75rem; height: 0.75rem; top: 50%; left: 50%;
                        transform: translate(-50%, -50%); pointer-events: none; }
                    .benefits-exit { height: 0.75rem; width: 0.75rem; margin: 1.5rem auto 0; pointer-events: none; }
                    @keyframes benefit-in { from { opacity: 0; transform: translateX(-50px); } to { opacity: 1; transform: none; } }
                    @media (min-width: 1024px) {
                        .benefits-grid { grid-template-columns: 1fr 1fr; }
                        .benefits-copy { padding-right: 2.5rem; }
                    }
                "#}
            </style>
            <div class="benefits-grid">
                <div class="benefits-copy">
                    <p class="eyebrow">{"Il Nostro Valore Aggiunto"}</p>
                    <h2>{"Scegliere Flash Impianti è Scegliere la Qualità."}</h2>
                    <p class="lead">{"Non siamo solo installatori, siamo consulenti energetici."}</p>
                </div>
                <div class="benefits-list">
                    { for BENEFITS.iter().enumerate().map(|(i, benefit)| {
                        let lit = glow.get(i).copied().unwrap_or(false);
                        let shown = entered.get(i).copied().unwrap_or(false);
                        html! {
                            <div
                                ref={cards[i].clone()}
                                class={classes!("benefit-card", lit.then(|| "lit"), shown.then(|| "entered"))}
                                style={format!("animation-delay: {}s;", entrance_delay(i))}
                            >
                                <div class="benefit-icon">{benefit.icon}</div>
                                <div>
                                    <h3>{benefit.title}</h3>
                                    <p>{benefit.desc}</p>
                                </div>
                                <div ref={markers[i].clone()} class="benefit-marker"></div>
                            </div>
                        }
                    }) }
                    <div ref={exit} class="benefits-exit"></div>
                </div>
            </div>
        </section>
    }
}
