use log::{error, info};
use yew::prelude::*;

use crate::beam::{BeamRenderer, PathDescriptor};
use crate::web::WebHost;

#[derive(Properties, PartialEq)]
pub struct ElectricBeamProps {
    pub descriptor: PathDescriptor,
}

/// Full-screen overlay that draws the beam. Every new descriptor tears the
/// previous renderer down and binds a fresh one.
#[function_component(ElectricBeam)]
pub fn electric_beam(props: &ElectricBeamProps) -> Html {
    let mount = use_node_ref();

    {
        let mount = mount.clone();
        use_effect_with_deps(
            move |descriptor: &PathDescriptor| {
                let renderer = match WebHost::new(mount) {
                    Ok(host) => {
                        let renderer = BeamRenderer::shared(host);
                        match BeamRenderer::bind(&renderer, descriptor.clone()) {
                            Ok(()) => Some(renderer),
                            Err(err) => {
                                error!("electric beam disabled: {}", err);
                                None
                            }
                        }
                    }
                    Err(err) => {
                        error!("electric beam disabled: {}", err);
                        None
                    }
                };

                move || {
                    if let Some(renderer) = renderer {
                        renderer.borrow_mut().teardown();
                        info!("electric beam released");
                    }
                }
            },
            props.descriptor.clone(),
        );
    }

    html! {
        <div
            ref={mount}
            id="beam-container"
            style="position: fixed; top: 0; left: 0; width: 100%; height: 100%; pointer-events: none; z-index: 40;"
        />
    }
}
