//! Cartesian-product enumeration over a list of finite domains.
//!
//! Used to ground action schemas (one domain per parameter, the objects of
//! that parameter's type) and to resolve existential quantifiers over a
//! fresh domain per quantified variable. Every call site already has each
//! domain materialized as a `Vec` (the object set of a type never changes
//! during a run), so this walks the product with a mixed-radix counter
//! rather than cloning per-position iterators: `advance` increments the
//! last domain's wheel, carrying into earlier domains on overflow, which is
//! also what gives grounding its parameter-major tie-break order (the
//! last-declared parameter varies fastest).

use streaming_iterator::StreamingIterator;

pub fn enumerate<T: Copy>(domains: Vec<Vec<T>>) -> impl StreamingIterator<Item = [T]> {
    Odometer::new(domains)
}

struct Odometer<T> {
    domains: Vec<Vec<T>>,
    wheels: Vec<usize>,
    current: Vec<T>,
    started: bool,
    done: bool,
}

impl<T: Copy> Odometer<T> {
    fn new(domains: Vec<Vec<T>>) -> Self {
        let done = domains.iter().any(|d| d.is_empty());
        let wheels = vec![0; domains.len()];
        Odometer {
            domains,
            wheels,
            current: Vec::new(),
            started: false,
            done,
        }
    }

    fn read_wheels(&self) -> Vec<T> {
        self.wheels.iter().zip(&self.domains).map(|(&i, d)| d[i]).collect()
    }
}

impl<T: Copy> StreamingIterator for Odometer<T> {
    type Item = [T];

    fn advance(&mut self) {
        if self.done {
            return;
        }
        if !self.started {
            self.started = true;
            self.current = self.read_wheels();
            return;
        }
        // Increment the rightmost wheel; an overflowing wheel resets to zero
        // and carries into the one to its left, odometer-style. Running off
        // the leftmost wheel means every combination has been produced.
        let mut pos = self.domains.len();
        loop {
            if pos == 0 {
                self.done = true;
                return;
            }
            pos -= 1;
            self.wheels[pos] += 1;
            if self.wheels[pos] < self.domains[pos].len() {
                break;
            }
            self.wheels[pos] = 0;
        }
        self.current = self.read_wheels();
    }

    fn get(&self) -> Option<&Self::Item> {
        if self.done {
            None
        } else {
            Some(self.current.as_slice())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_of_two_domains() {
        let mut it = enumerate(vec![vec![0, 1], vec![1, 2]]);
        let mut out = Vec::new();
        while let Some(x) = it.next() {
            out.push(x.to_vec());
        }
        assert_eq!(out, vec![vec![0, 1], vec![0, 2], vec![1, 1], vec![1, 2]]);
    }

    #[test]
    fn empty_domain_list_yields_one_empty_tuple() {
        assert_eq!(enumerate(Vec::<Vec<i32>>::new()).count(), 1);
    }

    #[test]
    fn a_domain_with_no_values_yields_nothing() {
        assert_eq!(enumerate(vec![vec![0, 1], Vec::<i32>::new()]).count(), 0);
    }
}
