fn main() {
    client::mount();
}
