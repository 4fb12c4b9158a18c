//! Change-making search.
//!
//! Both strategies walk `Coin::DESCENDING` and never hand back more of a
//! coin kind than its cap allows. They only read the caps, so a failed
//! search leaves nothing behind to roll back.

use crate::coin::Coin;
use crate::config::SearchStrategy;
use crate::ledger::CoinLedger;
use std::collections::HashSet;

/// Finds coins from `caps` worth exactly `owed`, using `strategy`.
///
/// Returns `None` when the strategy cannot reach `owed` exactly. An `owed`
/// of zero always succeeds with an empty ledger.
pub fn find_change(owed: u64, caps: &CoinLedger, strategy: SearchStrategy) -> Option<CoinLedger> {
    match strategy {
        SearchStrategy::Greedy => greedy(owed, caps),
        SearchStrategy::Exhaustive => exhaustive(owed, caps),
    }
}

/// Takes as many of each coin as fit, from the highest value down.
///
/// A single pass with no backtracking. Always finds change in a canonical
/// coin system with enough stock, but can miss a combination that exists
/// when a lower denomination has run out.
pub fn greedy(owed: u64, caps: &CoinLedger) -> Option<CoinLedger> {
    let mut remaining = owed;
    let mut change = CoinLedger::new();

    for coin in Coin::DESCENDING {
        let take = (remaining / coin.minor_value()).min(caps.count(coin));
        if take > 0 {
            change = change.with(coin, take);
            remaining -= take * coin.minor_value();
        }
    }

    (remaining == 0).then_some(change)
}

const LEVELS: usize = Coin::DESCENDING.len();

/// Largest amount owed that [`exhaustive`] tabulates up front, one bit per
/// minor unit per coin kind.
pub const TABULATION_LIMIT: u64 = 1 << 20;

/// Searches every count of every coin, highest value first.
///
/// At each level counts are tried from the largest affordable down to zero,
/// so the first solution found is the greedy one whenever greedy succeeds.
///
/// Up to [`TABULATION_LIMIT`] the amounts payable from each level down are
/// computed first as a bounded-knapsack bitset, after which the descent
/// never backtracks: the work is linear in `owed` times the number of coin
/// kinds. Larger amounts fall back to a memoised depth-first search that
/// prunes on the stock value and on the gcd of the denominations still in
/// stock. The fallback can still backtrack heavily on adversarial stock.
pub fn exhaustive(owed: u64, caps: &CoinLedger) -> Option<CoinLedger> {
    if owed == 0 {
        return Some(CoinLedger::new());
    }

    let picked = if owed <= TABULATION_LIMIT {
        tabulated(owed, caps)?
    } else {
        let mut search = Backtracking::new(caps);
        if !search.descend(0, owed) {
            return None;
        }
        search.picked
    };

    Some(Coin::DESCENDING.into_iter().zip(picked).collect())
}

fn tabulated(owed: u64, caps: &CoinLedger) -> Option<[u64; LEVELS]> {
    // reachable[level] holds the amounts up to `owed` payable from
    // Coin::DESCENDING[level..]; reachable[LEVELS] is just zero.
    let mut current = Bitset::zero_only(owed as usize);
    let mut reachable = vec![current.clone()];
    for coin in Coin::DESCENDING.iter().rev() {
        let value = coin.minor_value();
        // binary splitting: chunks 1, 2, 4, .. cover every count up to the cap
        let mut left = caps.count(*coin).min(owed / value);
        let mut chunk = 1u64;
        while left > 0 {
            let take = chunk.min(left);
            current.shift_or((take * value) as usize);
            left -= take;
            chunk = chunk.saturating_mul(2);
        }
        reachable.push(current.clone());
    }
    reachable.reverse();

    if !reachable[0].contains(owed as usize) {
        return None;
    }

    let mut picked = [0; LEVELS];
    let mut remaining = owed;
    for (level, coin) in Coin::DESCENDING.into_iter().enumerate() {
        let value = coin.minor_value();
        let most = (remaining / value).min(caps.count(coin));
        let take = (0..=most)
            .rev()
            .find(|take| reachable[level + 1].contains((remaining - take * value) as usize))?;
        picked[level] = take;
        remaining -= take * value;
    }

    (remaining == 0).then_some(picked)
}

/// Fixed-width set of amounts `0..=max`.
#[derive(Clone)]
struct Bitset {
    words: Vec<u64>,
    max: usize,
}

impl Bitset {
    fn zero_only(max: usize) -> Self {
        let mut words = vec![0; max / 64 + 1];
        words[0] = 1;
        Bitset { words, max }
    }

    fn contains(&self, amount: usize) -> bool {
        amount <= self.max && (self.words[amount / 64] >> (amount % 64)) & 1 == 1
    }

    /// Adds `amount + shift` for every amount already present, dropping
    /// anything above `max`.
    fn shift_or(&mut self, shift: usize) {
        if shift > self.max {
            return;
        }
        let word_shift = shift / 64;
        let bit_shift = shift % 64;

        // high to low so every source word is read before it is written
        for dest in (word_shift..self.words.len()).rev() {
            let src = dest - word_shift;
            let mut moved = self.words[src] << bit_shift;
            if bit_shift > 0 && src > 0 {
                moved |= self.words[src - 1] >> (64 - bit_shift);
            }
            self.words[dest] |= moved;
        }

        let tail = self.max % 64;
        if tail < 63 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << (tail + 1)) - 1;
            }
        }
    }
}

struct Backtracking<'a> {
    caps: &'a CoinLedger,
    /// Value of every capped coin from each level down, saturating.
    stock: [u64; LEVELS + 1],
    /// Gcd of the stocked denominations from each level down, zero if none.
    divisor: [u64; LEVELS + 1],
    dead: HashSet<(usize, u64)>,
    picked: [u64; LEVELS],
}

impl<'a> Backtracking<'a> {
    fn new(caps: &'a CoinLedger) -> Self {
        let mut stock = [0u64; LEVELS + 1];
        let mut divisor = [0; LEVELS + 1];
        for level in (0..LEVELS).rev() {
            let coin = Coin::DESCENDING[level];
            let count = caps.count(coin);
            stock[level] = stock[level + 1].saturating_add(coin.minor_value().saturating_mul(count));
            divisor[level] = if count > 0 {
                gcd(divisor[level + 1], coin.minor_value())
            } else {
                divisor[level + 1]
            };
        }

        Backtracking {
            caps,
            stock,
            divisor,
            dead: HashSet::new(),
            picked: [0; LEVELS],
        }
    }

    fn descend(&mut self, level: usize, remaining: u64) -> bool {
        if remaining == 0 {
            return true;
        }
        if level == LEVELS || self.dead.contains(&(level, remaining)) {
            return false;
        }
        // stock[level] is zero whenever divisor[level] is
        if self.stock[level] < remaining || remaining % self.divisor[level] != 0 {
            self.dead.insert((level, remaining));
            return false;
        }

        let coin = Coin::DESCENDING[level];
        let most = (remaining / coin.minor_value()).min(self.caps.count(coin));

        for take in (0..=most).rev() {
            self.picked[level] = take;
            if self.descend(level + 1, remaining - take * coin.minor_value()) {
                return true;
            }
        }

        self.picked[level] = 0;
        self.dead.insert((level, remaining));
        false
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
