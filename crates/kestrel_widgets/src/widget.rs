//! Base control trait

use kestrel_core::ViewId;
use kestrel_theme::{ControlTokenSet, ThemeHost, TokenSetKey};

/// A view that resolves its appearance from a [`ControlTokenSet`].
///
/// Controls never cache token values across renders: [`render`](Control::render)
/// reads every token it needs from the set each time it runs.
pub trait Control {
    /// Key type of the control's token set
    type Tokens: TokenSetKey;

    /// The view this control occupies
    fn view(&self) -> ViewId;

    /// The control's token set
    fn token_set(&self) -> &ControlTokenSet<Self::Tokens>;

    /// Re-resolve the control's appearance from its tokens
    fn render(&self);

    /// Called after the control's view moved into a new window or subtree.
    ///
    /// A registered control whose theme changed re-renders on the next
    /// dispatch turn through its update callback; otherwise it re-renders now.
    fn did_move_to<H: ThemeHost>(&self, host: &H) {
        let tokens = self.token_set();
        if !tokens.update(&host.theme_for(self.view())) || !tokens.is_registered() {
            self.render();
        }
    }
}
