use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

mod beam;
mod config;
mod web;

mod components {
    pub mod beam;
    pub mod benefits;
    pub mod glow;
    pub mod layout;
    pub mod services;
}

use beam::{AnchorSet, PathDescriptor, PathJoin};
use components::{
    beam::ElectricBeam,
    benefits::BenefitsScene,
    layout::{Contact, Footer, Hero, Logo, Spacer, PAGE_CSS},
    services::ServicesScene,
};
use config::NAV_SCROLLED_THRESHOLD;
use web::current_viewport;

const NAV_LINKS: [(&str, &str); 3] = [
    ("Servizi", "#servizi"),
    ("Vantaggi", "#vantaggi"),
    ("Contatti", "#contatti"),
];

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state_eq(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(
            move |_| {
                let destructor: Box<dyn FnOnce()> = if let Some(window) = web_sys::window() {
                    let callback = Closure::<dyn Fn()>::new({
                        let is_scrolled = is_scrolled.clone();
                        move || {
                            if let Some(win) = web_sys::window() {
                                if let Ok(scroll_y) = win.scroll_y() {
                                    is_scrolled.set(scroll_y > NAV_SCROLLED_THRESHOLD);
                                }
                            }
                        }
                    });
                    if let Err(err) = window
                        .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                    {
                        warn!("nav scroll listener not attached: {:?}", err);
                    }
                    Box::new(move || {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            callback.as_ref().unchecked_ref(),
                        );
                    })
                } else {
                    Box::new(|| ())
                };
                move || {
                    destructor();
                }
            },
            (),
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <style>
                {r#"
                    .top-nav { position: fixed; width: 100%; z-index: 50; padding: 1.5rem 0; transition: all 0.5s; }
                    .top-nav.scrolled { padding: 0.75rem 0; background: rgba(2, 6, 23, 0.95); backdrop-filter: blur(16px);
                        border-bottom: 1px solid rgba(255, 255, 255, 0.05); }
                    .nav-content { max-width: 80rem; margin: 0 auto; padding: 0 1.5rem; display: flex;
                        justify-content: space-between; align-items: center; }
                    .nav-links { display: none; gap: 2rem; }
                    .nav-link { font-size: 0.875rem; font-weight: 500; color: #cbd5e1; }
                    .nav-link:hover { color: #facc15; }
                    .burger-menu { background: none; border: none; color: #fff; font-size: 1.5rem; }
                    .mobile-menu { display: flex; flex-direction: column; gap: 1rem; padding: 1rem; background: #0f172a; }
                    .mobile-menu .nav-link { font-size: 1.125rem; color: #fff; padding-bottom: 0.5rem;
                        border-bottom: 1px solid rgba(30, 41, 59, 0.5); }
                    @media (min-width: 768px) {
                        .nav-links { display: flex; }
                        .burger-menu, .mobile-menu { display: none; }
                    }
                "#}
            </style>
            <div class="nav-content">
                <Logo />
                <div class="nav-links">
                    { for NAV_LINKS.iter().map(|(name, href)| html! {
                        <a href={*href} class="nav-link">{*name}</a>
                    }) }
                </div>
                <button class="burger-menu" onclick={toggle_menu} aria-label="Toggle Menu">
                    { if *menu_open { "✕" } else { "☰" } }
                </button>
            </div>
            if *menu_open {
                <div class="mobile-menu">
                    { for NAV_LINKS.iter().map(|(name, href)| html! {
                        <a href={*href} class="nav-link" onclick={close_menu.clone()}>{*name}</a>
                    }) }
                </div>
            }
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    let join = use_mut_ref(PathJoin::new);
    let descriptor = use_state(|| None::<PathDescriptor>);

    let publish = {
        let descriptor = descriptor.clone();
        Callback::from(move |path: Option<PathDescriptor>| {
            if let Some(path) = path {
                descriptor.set(Some(path));
            }
        })
    };

    let on_services_ready = {
        let join = join.clone();
        let publish = publish.clone();
        Callback::from(move |set: AnchorSet| {
            let path = join.borrow_mut().set_services(set, &current_viewport());
            publish.emit(path);
        })
    };

    let on_benefits_ready = {
        let join = join.clone();
        let publish = publish.clone();
        Callback::from(move |set: AnchorSet| {
            let path = join.borrow_mut().set_benefits(set, &current_viewport());
            publish.emit(path);
        })
    };

    // Layout shifts move every anchor
    {
        let join = join.clone();
        use_event_with_window("resize", move |_: Event| {
            let path = join.borrow_mut().try_compute(&current_viewport());
            publish.emit(path);
        });
    }

    html! {
        <div class="app">
            <style>{PAGE_CSS}</style>
            {
                match &*descriptor {
                    Some(path) => html! { <ElectricBeam descriptor={path.clone()} /> },
                    None => html! {},
                }
            }
            <Nav />
            <main>
                <Hero />
                <ServicesScene on_ready={on_services_ready} />
                <Spacer height_vh={5} class="spacer-dark" />
                <BenefitsScene on_ready={on_benefits_ready} />
                <Spacer height_vh={5} class="spacer-darker" />
                <Contact />
            </main>
            <Footer />
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
