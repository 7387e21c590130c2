use depsel_util::progress::spinner;

#[test]
fn test_spinner_carries_message() {
    let sp = spinner("Resolving dependencies...");
    assert_eq!(sp.message(), "Resolving dependencies...");
    sp.finish_and_clear();
    assert!(sp.is_finished());
}
