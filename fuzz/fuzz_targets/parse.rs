#![no_main]

use latex_ast::{Parser, ParserConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let tree = latex_ast::parse(data);
    // The dump walks the whole tree.
    let _ = tree.to_string();

    // A low ceiling exercises the literal fallback on ordinary inputs.
    let config = ParserConfig {
        max_depth: 3,
        ..Default::default()
    };
    let _ = Parser::with_config(data, config).parse().to_string();
});
