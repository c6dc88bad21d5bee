use crate::hand::Hand;
use std::ops::{Index, IndexMut};

/// Every hand in a game, seated in turn order, with a cursor on the hand
/// whose turn it is. Membership is fixed after setup.
#[derive(Debug, Clone, Default)]
pub struct Hands {
    hands: Vec<Hand>,
    current: usize,
}

impl Hands {
    pub fn new(hands: Vec<Hand>) -> Self {
        Hands { hands, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hand> {
        self.hands.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Hand> {
        self.hands.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Hand> {
        self.hands.get(index)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Hand {
        &self.hands[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Hand {
        &mut self.hands[self.current]
    }

    pub fn set_current(&mut self, index: usize) {
        assert!(index < self.hands.len(), "no hand at position {}", index);
        self.current = index;
    }

    /// The seat after `index`, wrapping from the last to the first
    pub fn next(&self, index: usize) -> usize {
        assert!(!self.is_empty(), "no hands are seated; there is no next hand");
        (index + 1) % self.hands.len()
    }

    /// The next seat after `index` held by a hand that has not resigned.
    ///
    /// Comes back to `index` itself if every other hand has resigned.
    ///
    /// # Panics
    /// If every hand has resigned; callers check [`Hands::have_all_resigned`]
    /// first.
    pub fn next_working(&self, index: usize) -> usize {
        assert!(
            !self.have_all_resigned(),
            "every hand has resigned; there is no next working hand"
        );
        let mut next = self.next(index);
        while self.hands[next].has_resigned() && next != index {
            next = self.next(next);
        }
        next
    }

    /// Move the cursor one seat
    pub fn advance(&mut self) {
        self.current = self.next(self.current);
    }

    /// Move the cursor to the next hand still playing
    pub fn advance_working(&mut self) {
        self.current = self.next_working(self.current);
    }

    pub fn has_any_gone_out(&self) -> bool {
        self.hands.iter().any(Hand::has_gone_out)
    }

    /// True when no hand is still playing (vacuously so with no hands)
    pub fn have_all_resigned(&self) -> bool {
        self.hands.iter().all(Hand::has_resigned)
    }

    pub fn count_working(&self) -> usize {
        self.hands.iter().filter(|h| !h.has_resigned()).count()
    }

    pub fn find_name(&self, name: &str) -> Option<usize> {
        self.hands.iter().position(|h| h.name() == name)
    }

    /// Seat of the hand with the longest run; ties go to the earliest seat
    pub fn index_of_longest_run(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (index, hand) in self.hands.iter().enumerate() {
            let length = hand.longest_run().count();
            if best.is_none_or(|(_, b)| length > b) {
                best = Some((index, length));
            }
        }
        best.map(|(index, _)| index)
    }
}

impl Index<usize> for Hands {
    type Output = Hand;

    fn index(&self, index: usize) -> &Hand {
        &self.hands[index]
    }
}

impl IndexMut<usize> for Hands {
    fn index_mut(&mut self, index: usize) -> &mut Hand {
        &mut self.hands[index]
    }
}
