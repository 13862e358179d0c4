#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::num::NonZeroUsize;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use running_prctile::codec::{self, Format};
    use running_prctile::{
        running_percentile, ElementType, PercentileError, Sample, Signal, SlidingPercentile,
    };

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    // Sorts every window from scratch.
    fn brute_force<T: Sample>(input: &[T], window: usize, rank: usize) -> Vec<T> {
        (0..input.len())
            .map(|i| {
                let start = (i + 1).saturating_sub(window);
                let mut sorted = input[start..=i].to_vec();
                sorted.sort_by(|a, b| a.order(b));
                sorted[rank.min(sorted.len()) - 1]
            })
            .collect()
    }

    #[test]
    fn test_random_doubles_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let len = rng.gen_range(0..60);
            // Few distinct values so windows hold many duplicates.
            let input: Vec<f64> = (0..len).map(|_| rng.gen_range(-4..5) as f64 * 0.5).collect();
            let window = rng.gen_range(1..20);
            let rank = rng.gen_range(1..25);
            assert_eq!(
                running_percentile(&input, nz(window), nz(rank)),
                brute_force(&input, window, rank),
                "input {input:?} window {window} rank {rank}"
            );
        }
    }

    #[test]
    fn test_random_singles_with_nan_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let input: Vec<f32> = (0..40)
                .map(|_| match rng.gen_range(0..10) {
                    0 => f32::NAN,
                    1 => f32::NEG_INFINITY,
                    _ => rng.gen::<f32>(),
                })
                .collect();
            let window = rng.gen_range(1..12);
            let rank = rng.gen_range(1..12);
            let expected = brute_force(&input, window, rank);
            let actual = running_percentile(&input, nz(window), nz(rank));
            // NaN != NaN, compare bit patterns instead
            let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
            assert_eq!(bits(&actual), bits(&expected));
        }
    }

    #[test]
    fn test_random_logicals_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let input: Vec<bool> = (0..30).map(|_| rng.gen_bool(0.4)).collect();
            let window = rng.gen_range(1..8);
            let rank = rng.gen_range(1..8);
            assert_eq!(
                running_percentile(&input, nz(window), nz(rank)),
                brute_force(&input, window, rank)
            );
        }
    }

    #[test]
    fn test_streaming_matches_batch_on_long_input() {
        let mut rng = StdRng::seed_from_u64(1234);
        let input: Vec<i32> = (0..5000).map(|_| rng.gen_range(-100..100)).collect();
        let mut filter = SlidingPercentile::new(nz(31), nz(16));
        let streamed: Vec<i32> = input.iter().map(|v| filter.consume(*v)).collect();
        assert_eq!(streamed, running_percentile(&input, nz(31), nz(16)));
        assert_eq!(filter.occupancy(), 31);
    }

    #[test]
    fn test_rank_beyond_window_is_window_maximum() {
        let input = [1.0, 8.0, 3.0, 2.0, 7.0, 0.0, 0.0];
        let out = running_percentile(&input, nz(3), nz(5));
        let maxima: Vec<f64> = (0..input.len())
            .map(|i| {
                input[(i + 1).saturating_sub(3)..=i]
                    .iter()
                    .cloned()
                    .fold(f64::NEG_INFINITY, f64::max)
            })
            .collect();
        assert_eq!(out, maxima);
    }

    #[test]
    fn test_text_pipeline() -> Result<(), PercentileError> {
        let input = Cursor::new("3 1 4 1 5 9 2 6\n");
        let signal = codec::read_signal(input, Format::Text, ElementType::Double)?;
        let filtered = signal.running_percentile(3, 2)?;
        let mut out = Vec::new();
        codec::write_signal(&mut out, Format::Text, &filtered)?;
        assert_eq!(String::from_utf8(out).unwrap(), "3\n3\n3\n1\n4\n5\n5\n6\n");
        Ok(())
    }

    #[test]
    fn test_json_pipeline() -> Result<(), PercentileError> {
        let input = Cursor::new(r#"{"type": "logical", "data": [true, false, false, true]}"#);
        let signal = codec::read_signal(input, Format::Json, ElementType::Double)?;
        let filtered = signal.running_percentile(2, 1)?;
        assert_eq!(filtered, Signal::Logical(vec![true, false, false, false]));

        let mut out = Vec::new();
        codec::write_signal(&mut out, Format::Json, &filtered)?;
        let decoded: Signal = serde_json::from_slice(&out)?;
        assert_eq!(decoded, filtered);
        Ok(())
    }

    #[test]
    fn test_unsupported_type_is_reported() {
        let err = "uint8".parse::<ElementType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "The data type 'uint8' is not supported, expected single, double or logical"
        );
    }
}
