/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;
/// Type alias for maps whose keys are iterated in order.
pub type OrderedMap<K, V> = std::collections::BTreeMap<K, V>;

/// Computes `ceil(log2(value))` using integer arithmetic only, with the convention that
/// values `0` and `1` need zero bits.
pub fn ceil_log2(value: usize) -> u32 {
    if value <= 1 {
        0
    } else {
        usize::BITS - (value - 1).leading_zeros()
    }
}

/// Returns the number of decimal digits of `2^bits - 1`. Since `2^bits` is never a power of
/// ten for `bits > 0`, this is `floor(bits * log10(2)) + 1`, and the convention for `bits = 0`
/// is a single digit. The product is evaluated in fixed point with 40 decimal digits of
/// `log10(2)`, fed in blocks of ten digits from the least significant one on, so no
/// intermediate value leaves `u128` and the time is constant.
pub fn decimal_digits_of_mersenne(bits: u64) -> usize {
    const BLOCK: u128 = 10_000_000_000;
    // log10(2) = 0.3010299956 6398119521 3738894724 4930267681 ...
    const LOG10_2: [u128; 4] = [3_010_299_956, 6_398_119_521, 3_738_894_724, 4_930_267_681];

    let bits = bits as u128;
    let whole = LOG10_2
        .iter()
        .rev()
        .fold(0, |carry, digits| (bits * digits + carry) / BLOCK);
    whole as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_logarithm() {
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(6), 3);
        assert_eq!(ceil_log2(8), 3);
        assert_eq!(ceil_log2(9), 4);
        assert_eq!(ceil_log2(10), 4);
    }

    #[test]
    fn mersenne_digits() {
        assert_eq!(decimal_digits_of_mersenne(0), 1);
        assert_eq!(decimal_digits_of_mersenne(3), 1);
        assert_eq!(decimal_digits_of_mersenne(4), 2);
        assert_eq!(decimal_digits_of_mersenne(21), 7);
        assert_eq!(decimal_digits_of_mersenne(64), 20);
        assert_eq!(decimal_digits_of_mersenne(623), 188);
        assert_eq!(decimal_digits_of_mersenne(1_560_055), 469_624);
        assert_eq!(decimal_digits_of_mersenne(4_320_057), 1_300_467);
        assert_eq!(decimal_digits_of_mersenne(u64::MAX), 5_553_023_288_523_357_132);
    }

    #[test]
    fn mersenne_digits_match_exact_powers() {
        // every Mersenne number below 2^128 is written out exactly
        for bits in 1..=127u32 {
            let value = (1u128 << bits) - 1;
            let digits = value.to_string().len();
            assert_eq!(decimal_digits_of_mersenne(bits as u64), digits, "2^{bits} - 1");
        }
    }
}
