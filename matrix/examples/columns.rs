use matrix::Matrix;
use rand::{distributions::Uniform, rngs::OsRng};

fn main() {
    let a = Matrix::sample(3, 4, Uniform::new(-9i64, 10), &mut OsRng);
    let b = Matrix::sample(4, 2, Uniform::new(-9i64, 10), &mut OsRng);
    println!("a =\n{a}");
    println!("b =\n{b}");
    println!("a * b =\n{}", &a * &b);

    for (col, values) in a.iter_cols().enumerate() {
        let sum: i64 = values.sum();
        println!("column {col} of a sums to {sum}");
    }

    let mut begin = a.col_begin(1);
    let end = a.col_end(1);
    while begin < end {
        print!("{} ", *begin);
        begin += 1;
    }
    println!();

    match a.checked_mul(&a) {
        Ok(square) => println!("a * a =\n{square}"),
        Err(err) => println!("a * a: {err}"),
    }
}
