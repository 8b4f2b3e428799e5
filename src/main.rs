use dicebag::Expression;

fn main() {
    pretty_env_logger::init();

    let mut notations: Vec<String> = std::env::args().skip(1).collect();
    if notations.is_empty() {
        notations.push("3d6 + 2d10 + 4".to_string());
    }

    let mut failed = false;
    for notation in &notations {
        match notation.parse::<Expression>() {
            Ok(expression) => {
                println!("{}", expression);
                println!("{}", expression.roll().pretty(3));
            }
            Err(err) => {
                log::error!("could not read {:?}: {}", notation, err);
                failed = true;
            }
        }
    }
    if failed {
        std::process::exit(1);
    }
}
