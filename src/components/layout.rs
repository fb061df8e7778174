use yew::prelude::*;

#[function_component(Logo)]
pub fn logo() -> Html {
    html! {
        <a href="#" class="logo">
            <div class="logo-mark">{"⚡"}</div>
            <div class="logo-text">
                <span class="logo-name">{"FLASH"}</span>
                <span class="logo-tag">{"Impianti"}</span>
            </div>
        </a>
    }
}

#[function_component(Hero)]
pub fn hero() -> Html {
    html! {
        <section class="hero">
            <div class="hero-content">
                <h1>
                    <span class="hero-highlight">{"FLASH"}</span>{" Energia"}
                </h1>
                <p class="hero-subtitle">
                    {"L'impiantistica che si illumina con lo scroll. Scorri per accendere la linea elettrica!"}
                </p>
                <div class="hero-badges">
                    <div class="hero-badge">{"🔋"}</div>
                    <div class="hero-badge">{"⚡"}</div>
                </div>
            </div>
        </section>
    }
}

#[function_component(Contact)]
pub fn contact() -> Html {
    html! {
        <section id="contatti" class="contact">
            <div class="contact-content">
                <h2>{"Contattaci: Il Fascio Si Ferma Qui."}</h2>
                <p class="lead">{"La tua richiesta è il prossimo passo."}</p>
            </div>
        </section>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="footer">
            <Logo />
            <p>{"Impianti elettrici civili e industriali."}</p>
        </footer>
    }
}

/// Spacer between sections, `height` in viewport-height units.
#[derive(Properties, PartialEq)]
pub struct SpacerProps {
    pub height_vh: u32,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Spacer)]
pub fn spacer(props: &SpacerProps) -> Html {
    html! {
        <div class={props.class.clone()} style={format!("height: {}vh;", props.height_vh)} />
    }
}

/// Page-wide styles shared by every section.
pub const PAGE_CSS: &str = r#"
    body { margin: 0; background: #020617; color: #e2e8f0; font-family: system-ui, sans-serif; overflow-x: hidden; }
    ::selection { background: #facc15; color: #000; }
    h1, h2, h3 { color: #fff; }
    h2 { font-size: 2.5rem; font-weight: 700; margin: 0 0 1.5rem; }
    h3 { font-size: 1.5rem; font-weight: 700; margin: 0 0 0.75rem; }
    p { color: #94a3b8; }
    .eyebrow { color: #facc15; text-transform: uppercase; font-weight: 700; font-size: 0.875rem; margin-bottom: 0.5rem; }
    .lead { font-size: 1.125rem; color: #cbd5e1; }
    a { color: #facc15; text-decoration: none; }
    .logo { display: flex; align-items: center; gap: 0.5rem; user-select: none; }
    .logo-mark { width: 2.5rem; height: 2.5rem; display: flex; align-items: center; justify-content: center;
        background: rgba(234, 179, 8, 0.1); border: 1px solid rgba(234, 179, 8, 0.2); border-radius: 0.5rem; }
    .logo-text { display: flex; flex-direction: column; line-height: 1; }
    .logo-name { font-weight: 900; font-size: 1.25rem; color: #fff; letter-spacing: -0.05em; }
    .logo-tag { font-weight: 700; font-size: 0.75rem; color: #facc15; letter-spacing: 0.2em; text-transform: uppercase; }
    .hero { position: relative; min-height: 100vh; display: flex; align-items: center; justify-content: center;
        padding-top: 5rem; background: #020617; text-align: center; }
    .hero h1 { font-size: clamp(3.5rem, 10vw, 6rem); font-weight: 900; line-height: 1.1; margin-bottom: 1.5rem; }
    .hero-highlight { background: linear-gradient(to right, #facc15, #fef08a, #fff);
        -webkit-background-clip: text; background-clip: text; color: transparent; }
    .hero-subtitle { font-size: 1.5rem; max-width: 42rem; margin: 0 auto 2.5rem; }
    .hero-badges { display: inline-flex; gap: 0.75rem; }
    .hero-badge { padding: 0.5rem; border-radius: 9999px; background: rgba(250, 204, 21, 0.1); }
    .contact { padding: 6rem 1.5rem; background: #020617; text-align: center; }
    .contact-content { max-width: 36rem; margin: 0 auto; }
    .footer { padding: 3rem 1.5rem; border-top: 1px solid rgba(255, 255, 255, 0.05);
        display: flex; flex-direction: column; align-items: center; gap: 1rem; }
    .spacer-dark { background: #0f172a; }
    .spacer-darker { background: #020617; }
"#;
