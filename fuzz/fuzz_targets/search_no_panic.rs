#![no_main]

use kernel::ast::Term;
use kernel::env::Env;
use kernel::parser;
use kernel::state::EvalState;
use libfuzzer_sys::fuzz_target;
use std::rc::Rc;
use tactics::resolve::recursive_argument;
use tactics::search;

// The parser and the search must never panic, whatever the input script
// looks like; failures have to come out as values or errors.
fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(script) = parser::script(source) else {
        return;
    };

    let names: Vec<String> = script.globals.names().map(str::to_string).collect();
    let env = Env::new(Rc::new(script.globals));

    for name in &names {
        let _ = recursive_argument(&env, &Term::constant(name.clone()));
    }

    if let Some(concl) = script.goal {
        for name in &names {
            let mut st = EvalState::new();
            let hole = st.fresh_meta();
            let target = Term::constant(name.clone());
            let _ = search(st, &env, &concl, &target, &[hole]);
        }
    }
});
