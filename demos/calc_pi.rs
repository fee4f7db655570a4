use bigfloat::{pi_cache, Float};
use log::info;

///! Print pi, e and a few logarithms with the requested number of bits.
///!  RUST_LOG=debug cargo run --example calc_pi --release -- 4000

fn main() -> bigfloat::Result<()> {
    env_logger::init();

    let prec = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok())
        .unwrap_or(256);

    let pi = Float::pi(prec);
    println!("pi = {}", pi);
    info!("the pi cache holds {} bits", pi_cache().precision());

    let e = Float::one(prec, false).exp()?;
    println!("e = {}", e);

    for x in [2, 3, 10] {
        let l = Float::from_u64(prec, x).log()?;
        println!("log({}) = {}", x, l);
    }

    let two = Float::from_u64(prec, 2);
    let half = Float::one(prec, false).scale(-1);
    println!("sqrt(2) = {}", two.pow(&half)?);

    assert_eq!(Float::pi(53).as_f64(), std::f64::consts::PI);
    Ok(())
}
