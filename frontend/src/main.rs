use yew::prelude::*;
use log::{info, Level};

mod config;
mod error;
mod counter {
    pub mod animator;
    pub mod scheduler;
}
mod sections {
    pub mod tracker;
    pub mod viewport;
}
mod waitlist {
    pub mod form;
    pub mod store;
    pub mod sync;
}
mod components {
    pub mod section_nav;
    pub mod waitlist_counter;
    pub mod waitlist_form;
}
mod pages {
    pub mod landing;
}

use pages::landing::Landing;


#[function_component]
fn App() -> Html {
    info!("Rendering landing page");
    html! {
        <Landing />
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
