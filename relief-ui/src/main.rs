mod app;
mod bridge;

fn main() {
    leptos::mount_to_body(app::App);
}
