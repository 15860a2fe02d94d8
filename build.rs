fn main() {
    // ESP-IDF link arguments are only needed for flash builds; host builds
    // (tests, fuzzing) compile the pure-logic core only.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
