/// Feeds polled on every aggregation pass.
pub const AI_FEEDS: &[&str] = &[
    "https://openai.com/blog/rss/",
    "https://ai.googleblog.com/feeds/posts/default",
    "http://news.mit.edu/topic/artificial-intelligence2/feed",
    "https://towardsdatascience.com/feed",
    "https://blogs.nvidia.com/blog/category/artificial-intelligence/feed/",
    "https://machinelearningmastery.com/feed/",
    "https://distill.pub/rss.xml",
    "https://www.deepmind.com/blog/rss.xml",
    "https://blogs.microsoft.com/ai/feed/",
    "https://research.facebook.com/blog/rss/",
    "https://aws.amazon.com/blogs/machine-learning/feed/",
    "https://blog.tensorflow.org/feeds/posts/default",
    "https://pytorch.org/blog/feed.xml",
    "https://www.fast.ai/index.xml",
    "https://lexfridman.com/feed/",
    "https://www.analyticsvidhya.com/feed/",
    "https://neptune.ai/blog/feed",
    "https://huggingface.co/blog/feed.xml",
    "https://www.kdnuggets.com/feed",
    "https://www.aidungeon.io/blog/rss.xml",
];

/// Lower-case terms; an item is kept when its title or summary contains any of them.
pub const AI_KEYWORDS: &[&str] = &[
    "ai",
    "machine learning",
    "deep learning",
    "gpt",
    "artificial intelligence",
    "neural network",
    "nlp",
    "robot",
    "data science",
    "transformer",
    "computer vision",
    "reinforcement learning",
    "pytorch",
    "tensorflow",
    "keras",
    "ml",
    "llm",
    "large language model",
    "stable diffusion",
    "generative ai",
];
