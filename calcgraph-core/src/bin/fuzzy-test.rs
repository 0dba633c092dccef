//! Generates random expressions and checks that evaluating their text in
//! postfix order gives the same value as evaluating the tree directly.

use calcgraph_core::context::{EvaluationContext, Function};
use calcgraph_core::lexer::Operator;
use calcgraph_core::node::Node;
use rand::prelude::*;

struct RecursiveCtx {
    pub depth: u32,
    pub inside_trigo: bool,
    pub inside_exp: u32,
}

fn random_num(ctx: &RecursiveCtx) -> f64 {
    let mut rng = thread_rng();
    match rng.gen_range(0..10) {
        0 => 0.0,
        1 => 1.0,
        // decimals, including negative ones
        2 => f64::from(rng.gen_range(-1000i32..1000)) / 100.0,
        x => {
            // If we're in a trigonometry function, we don't want enormous
            // numbers.
            if !ctx.inside_trigo && x == 9 {
                return f64::from(rng.gen::<i32>());
            }
            // If we're in a exponential function, we really don't want big
            // numbers.
            if ctx.inside_exp > 0 {
                return f64::from(rng.gen_range(-3i32..4));
            }
            f64::from(rng.gen_range(-100i32..100))
        }
    }
}

fn random_binary(ctx: RecursiveCtx) -> Node {
    const OPS: [Operator; 4] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Times,
        Operator::Slash,
    ];
    let mut rng = thread_rng();
    let op = if ctx.inside_exp < 2 && rng.gen_range(0..5) == 0 {
        Operator::Hat
    } else {
        OPS[rng.gen_range(0..OPS.len())]
    };

    let child_ctx = || {
        if op == Operator::Hat {
            ctx.for_exp_call()
        } else {
            ctx.for_child()
        }
    };
    Node::Binary(
        op,
        Box::new(random_node(child_ctx())),
        Box::new(random_node(child_ctx())),
    )
}

fn random_node(ctx: RecursiveCtx) -> Node {
    let mut rng = thread_rng();
    // limit the amount of node depth
    if ctx.depth < 6 && rng.gen_range(0..10) > 2 {
        // pick a composite node
        if rng.gen_range(0..4) > 0 {
            return random_binary(ctx);
        }
        let f = Function::ALL[rng.gen_range(0..Function::ALL.len())];
        let inner = match f {
            Function::Sin | Function::Cos | Function::Tan => random_node(ctx.for_trigo_call()),
            Function::Exp => random_node(ctx.for_exp_call()),
            _ => random_node(ctx.for_child()),
        };
        return Node::call(f, inner);
    }
    // pick leaf node
    if rng.gen_range(0..3) == 0 {
        Node::x()
    } else {
        Node::Num(random_num(&ctx))
    }
}

impl RecursiveCtx {
    fn new() -> Self {
        Self {
            depth: 0,
            inside_trigo: false,
            inside_exp: 0,
        }
    }

    fn for_child(&self) -> Self {
        Self {
            depth: self.depth + 1,
            inside_trigo: self.inside_trigo,
            inside_exp: self.inside_exp,
        }
    }

    fn for_trigo_call(&self) -> Self {
        Self {
            inside_trigo: true,
            ..self.for_child()
        }
    }

    fn for_exp_call(&self) -> Self {
        Self {
            inside_exp: self.inside_exp + 1,
            ..self.for_child()
        }
    }
}

fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

fn main() {
    let mut rng = thread_rng();
    let mut nan_count = 0;

    for i in 0..5000 {
        let node = random_node(RecursiveCtx::new());
        let text = node.to_string();
        let x = f64::from(rng.gen_range(-50i32..50)) / 4.0;

        if i != 0 {
            println!();
        }
        println!("Testing {} at x = {}:\n", text, x);

        let ground_truth = node
            .eval(&EvaluationContext::with_x(x))
            .expect("random trees only use known names");
        println!("- tree evaluation: {}", ground_truth);
        if ground_truth.is_nan() {
            nan_count += 1;
        }

        let postfix = calcgraph_core::to_postfix_text(&text).expect("displayed trees are valid");
        println!("- postfix: {}", postfix);

        let result = calcgraph_core::evaluate_text_at(&text, x).expect("displayed trees are valid");
        println!("- postfix evaluation: {}", result);
        assert!(same_value(result, ground_truth));

        let reparsed = calcgraph_core::parse_tree(&text)
            .and_then(|tree| tree.eval(&EvaluationContext::with_x(x)))
            .expect("displayed trees are valid");
        println!("- reparsed tree evaluation: {}", reparsed);
        assert!(same_value(reparsed, ground_truth));
    }

    println!("\n{} of 5000 expressions were not defined", nan_count);
}
