use jsource_core::{parse_str, validate_class, ClassNode};
use miette::Report;
use std::fs;

#[test]
fn test_all_java_fixtures() {
    let fixtures_dir = "./tests/fixtures";
    let entries = fs::read_dir(fixtures_dir).expect("Failed to read fixtures directory");

    let mut parsed = 0;
    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|ext| ext == "java") {
            println!("Parsing file: {:?}", path);
            let source = fs::read_to_string(&path)
                .unwrap_or_else(|_| panic!("Failed to read file: {:?}", path));

            let mut class = match parse_str::<ClassNode>(&source) {
                Ok(class) => class,
                Err(err) => panic!("Failed to parse {:?}. Error: {:#?}", path, Report::new(err)),
            };

            let rendered = class.to_string();
            let reparsed = match parse_str::<ClassNode>(&rendered) {
                Ok(class) => class,
                Err(err) => panic!(
                    "Canonical output of {:?} does not parse. Error: {:#?}",
                    path,
                    Report::new(err)
                ),
            };
            assert_eq!(reparsed, class, "{:?} is not stable under round-trip", path);
            assert_eq!(reparsed.to_string(), rendered);

            validate_class(&mut class).expect("validation of a fresh parse cannot fail");
            assert_eq!(class.to_string(), rendered);
            parsed += 1;
        }
    }
    assert!(parsed >= 3, "expected the fixture files to be found");
}
