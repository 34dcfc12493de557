use ordered_trees::avl_tree::HeightBalance;
use ordered_trees::ordered_tree::{OrderedTree, Strategy, Unbalanced};
use ordered_trees::red_black_tree::ColorBalance;
use simplelog::{Config, LevelFilter, SimpleLogger};
use std::env;
use std::process;

const DEFAULT_ELEMENTS: [i64; 9] = [50, 30, 70, 20, 40, 60, 80, 35, 45];

fn show<S>(name: &str, elements: &[i64])
where
    S: Strategy,
{
    let mut tree: OrderedTree<i64, S> = elements.iter().cloned().collect();
    log::info!("{}: {} elements, height {}", name, tree.len(), tree.height());
    println!("{}\n{}", name, tree);

    if let Some(first) = elements.first() {
        tree.remove(first);
        log::info!("{}: removed {}, height {}", name, first, tree.height());
        println!("{} without {}\n{}", name, first, tree);
    }
}

fn main() {
    let level = env::var("TREE_LOG")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    if let Err(error) = SimpleLogger::init(level, Config::default()) {
        eprintln!("failed to initialize logger: {}", error);
    }

    let args = env::args().skip(1).collect::<Vec<String>>();
    let elements = if args.is_empty() {
        DEFAULT_ELEMENTS.to_vec()
    } else {
        match args.iter().map(|arg| arg.parse::<i64>()).collect::<Result<Vec<i64>, _>>() {
            Ok(elements) => elements,
            Err(error) => {
                log::error!("elements must be integers: {}", error);
                process::exit(1);
            },
        }
    };

    show::<Unbalanced>("bst", &elements);
    show::<HeightBalance>("avl", &elements);
    show::<ColorBalance>("red-black", &elements);
}
