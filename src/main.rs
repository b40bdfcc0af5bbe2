use sph_field::init::InitApp;

fn main() {
    sph_field::start(InitApp::default());
}
