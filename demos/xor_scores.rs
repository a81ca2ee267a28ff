use bce_loss::{CrossEntropyEvaluator, LogPolicy, LossConfig, Reduction, cross_entropy};

// Sigmoid outputs of a small tanh/sigmoid XOR classifier after training,
// one row per input pair.
const INPUTS: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
const LABELS: [f64; 4] = [0.0, 1.0, 1.0, 0.0];
const PREDICTIONS: [f64; 4] = [0.083, 0.912, 0.897, 0.121];

fn main() {
    for (input, p) in INPUTS.iter().zip(PREDICTIONS.iter()) {
        println!("Input: {:?} -> Output: {:.4}", input, p);
    }

    match cross_entropy(&LABELS, &PREDICTIONS) {
        Ok(loss) => println!("\nTotal loss: {loss:.6}"),
        Err(e) => eprintln!("\nTotal loss failed: {e}"),
    }

    let mean = CrossEntropyEvaluator::new(LossConfig::new(LogPolicy::Strict, Reduction::Mean));
    match mean.report(&LABELS, &PREDICTIONS) {
        Ok(report) => println!("{report}"),
        Err(e) => eprintln!("Mean loss failed: {e}"),
    }

    // A saturated output network: strict refuses it, clamp and propagate do not.
    let saturated = [0.0, 1.0, 1.0, 1.0];
    for policy in [LogPolicy::Strict, LogPolicy::clamp(), LogPolicy::Propagate] {
        let evaluator = CrossEntropyEvaluator::new(LossConfig::new(policy, Reduction::Sum));
        match evaluator.evaluate(&LABELS, &saturated) {
            Ok(loss) => println!("{policy:>20}: loss = {loss}"),
            Err(e) => println!("{policy:>20}: {e}"),
        }
    }
}
