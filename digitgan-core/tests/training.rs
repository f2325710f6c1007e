use digitgan_core::model::Sequential;
use digitgan_core::nn::{BCELoss, LeakyReLU, Linear, Module, Sigmoid, Tanh};
use digitgan_core::optim::{AdamOptimizer, Optimizer};
use digitgan_core::ops::view::reshape_op;
use digitgan_core::tensor::{ones, randn, zeros};
use digitgan_core::DigitGanError;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod common;
use common::create_test_tensor;

fn xor_net(rng: &mut StdRng) -> Result<Sequential, DigitGanError> {
    let mut net = Sequential::new();
    net.add_module("0", Box::new(Linear::new(2, 8, true, rng)?));
    net.add_module("1", Box::new(Tanh));
    net.add_module("2", Box::new(Linear::new(8, 1, true, rng)?));
    net.add_module("3", Box::new(Sigmoid));
    Ok(net)
}

#[test]
fn test_mlp_learns_xor() -> Result<(), DigitGanError> {
    let mut rng = StdRng::seed_from_u64(42);
    let net = xor_net(&mut rng)?;
    let mut optimizer = AdamOptimizer::with_lr(net.parameters(), 0.05)?;
    let criterion = BCELoss::new();

    let x = create_test_tensor(vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0], vec![4, 2]);
    let y = create_test_tensor(vec![0.0, 1.0, 1.0, 0.0], vec![4]);

    let mut first_loss = None;
    let mut last_loss = 0.0;
    for _ in 0..400 {
        optimizer.zero_grad();
        let pred = reshape_op(&net.forward(&x)?, vec![4])?;
        let loss = criterion.calculate(&pred, &y)?;
        last_loss = loss.item()?;
        first_loss.get_or_insert(last_loss);
        loss.backward()?;
        optimizer.step()?;
    }
    let first_loss = first_loss.expect("at least one step");
    assert!(
        last_loss < first_loss * 0.5,
        "loss went from {} to {}",
        first_loss,
        last_loss
    );
    Ok(())
}

#[test]
fn test_two_optimizers_update_disjoint_networks() -> Result<(), DigitGanError> {
    // Adversarial pattern: a loss through both networks, only one optimizer steps
    let mut rng = StdRng::seed_from_u64(3);
    let mut gen = Sequential::new();
    gen.add_module("0", Box::new(Linear::new(2, 3, true, &mut rng)?));
    gen.add_module("1", Box::new(Tanh));
    let mut disc = Sequential::new();
    disc.add_module("0", Box::new(Linear::new(3, 1, true, &mut rng)?));
    disc.add_module("1", Box::new(LeakyReLU::new(0.01)));
    disc.add_module("2", Box::new(Sigmoid));

    let mut opt_d = AdamOptimizer::with_lr(disc.parameters(), 0.01)?;
    let criterion = BCELoss::new();

    let gen_before: Vec<Vec<f32>> = gen.parameters().iter().map(|p| p.get_f32_data()).collect();
    let disc_before: Vec<Vec<f32>> = disc.parameters().iter().map(|p| p.get_f32_data()).collect();

    let noise = randn(vec![4, 2], &mut rng)?;
    let fake = gen.forward(&noise)?;
    let pred = reshape_op(&disc.forward(&fake)?, vec![4])?;
    let loss = criterion.calculate(&pred, &zeros(vec![4])?)?;

    opt_d.zero_grad();
    loss.backward_with(true)?;
    opt_d.step()?;

    // Generator received gradients but nobody stepped it
    for (p, before) in gen.parameters().iter().zip(&gen_before) {
        assert!(p.grad().is_some());
        assert_eq!(&p.get_f32_data(), before);
    }
    for (p, before) in disc.parameters().iter().zip(&disc_before) {
        assert_ne!(&p.get_f32_data(), before);
    }

    // The retained generator graph can be differentiated again
    let pred_again = reshape_op(&disc.forward(&fake)?, vec![4])?;
    let loss_g = criterion.calculate(&pred_again, &ones(vec![4])?)?;
    loss_g.backward()?;
    Ok(())
}
