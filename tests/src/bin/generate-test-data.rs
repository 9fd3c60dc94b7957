use chrono::{Duration, Utc};
use rand::Rng;
use remark_api::{Author, CommentId, Content, ContentId, RawComment, Time, UserId};

const NUM_USERS: u64 = 5;
const NUM_TOP_LEVEL_COMMENTS: usize = 20;

// replies nest deeper than clients keep in memory
const MAX_DEPTH: usize = 4;
const MAX_REPLIES: usize = 6;

const COMMENT_MIN_WORDS: usize = 3;
const COMMENT_MAX_WORDS: usize = 60;
const MAX_AGE_MINUTES: i64 = 60 * 24 * 30;

struct Generator<R> {
    rng: R,
    users: Vec<Author>,
    content: ContentId,
    next_id: u64,
}

impl<R: Rng> Generator<R> {
    fn gen_text(&mut self) -> String {
        let words = self.rng.gen_range(COMMENT_MIN_WORDS..=COMMENT_MAX_WORDS);
        lipsum::lipsum_words_with_rng(&mut self.rng, words)
    }

    fn gen_comment(&mut self, depth: usize, after: Time) -> RawComment {
        self.next_id += 1;
        let id = CommentId::from(self.next_id);
        let author = self.users[self.rng.gen_range(0..self.users.len())].clone();
        let minutes = (Utc::now() - after).num_minutes().max(1);
        let created_at = after + Duration::minutes(self.rng.gen_range(0..minutes));
        let updated_at = match self.rng.gen_bool(0.1) {
            true => created_at + Duration::minutes(self.rng.gen_range(1..60)),
            false => created_at,
        };
        let num_replies = match depth < MAX_DEPTH && self.rng.gen_bool(0.4) {
            true => self.rng.gen_range(1..=MAX_REPLIES),
            false => 0,
        };
        let replies = (0..num_replies)
            .map(|_| self.gen_comment(depth + 1, created_at))
            .collect::<Vec<_>>();
        let likes_count = self.rng.gen_range(0..50);
        RawComment {
            id,
            content_id: self.content.clone(),
            author,
            text: self.gen_text(),
            created_at,
            updated_at,
            likes_count,
            is_liked: likes_count > 0 && self.rng.gen_bool(0.2),
            replies_count: replies.len() as u64,
            replies,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let content = ContentId::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| String::from("post-1"))
            .as_str(),
    );
    let mut rng = rand::thread_rng();
    let users = (1..=NUM_USERS)
        .map(|i| Author {
            id: UserId::from(i),
            name: lipsum::lipsum_words_with_rng(&mut rng, 2),
            avatar: rng
                .gen_bool(0.5)
                .then(|| format!("https://avatars.example.org/{i}.png")),
        })
        .collect();
    let mut gen = Generator {
        rng,
        users,
        content: content.clone(),
        next_id: 0,
    };

    let start = Utc::now() - Duration::minutes(MAX_AGE_MINUTES);
    let mut comments = (0..NUM_TOP_LEVEL_COMMENTS)
        .map(|_| gen.gen_comment(1, start))
        .collect::<Vec<_>>();
    comments.sort_by_key(|c| c.created_at);

    println!(
        "{}",
        serde_json::to_string_pretty(&Content {
            id: content,
            comments
        })?
    );
    Ok(())
}
