//! Page and payload fixtures mirroring the board's markup

/// Listing page with two tmovie posts, one promoted tdrama post and a notice
pub const LISTING_HTML: &str = r#"<html><body>
<table class="b_list">
  <tr>
    <td class="num">3</td>
    <td class="subject"><div class="list_subject">
      <a class="stitle1" href="board.php?mode=view&amp;b_id=tmovie&amp;id=359715&amp;page=1">Recoil 2011 1080p</a>
      <span class="sub_kor">한글</span>
    </div></td>
    <td class="datetime">10-19</td>
  </tr>
  <tr>
    <td class="num">-</td>
    <td class="subject"><div class="list_subject">
      <a class="stitle5" href="board.php?mode=view&amp;b_id=tdrama&amp;id=8812&amp;page=1">Promoted drama</a>
    </div></td>
    <td class="datetime">10-18</td>
  </tr>
  <tr>
    <td class="num">2</td>
    <td class="subject"><div class="list_subject">
      <a class="stitle2" href="board.php?mode=view&amp;b_id=tmovie&amp;id=359700&amp;page=1">Another Movie</a>
    </div></td>
    <td class="datetime">10-17</td>
  </tr>
  <tr>
    <td class="subject"><div class="list_subject"><span>공지사항</span></div></td>
  </tr>
</table>
</body></html>"#;

/// Post page with a direct subtitle link and a short-link torrent at `short_link`
pub fn post_html(short_link: &str) -> String {
    format!(
        r#"<html><body>
<div class="view_title">[영화] Recoil 2011 1080p</div>
<table class="view_table">
  <tr><td class="view_t3">등록일 : 2021-05-03 10:15:00</td></tr>
  <tr><td class="view_t4"><a href="/download.php?id=9&amp;bo=tmovie">Recoil.2011.srt</a></td></tr>
  <tr><td class="view_t4"><a href="{short_link}">Recoil.2011.torrent</a></td></tr>
</table>
</body></html>"#
    )
}

/// Redirector page whose inline script names `endpoint`
pub fn short_link_html(endpoint: &str) -> String {
    format!(
        r##"<html><head>
<script src="/js/jquery.min.js"></script>
<script>
  // filetender delivery
  $(function() {{ $("#dl").attr("action", "{endpoint}"); }});
</script>
</head><body>
<form id="dl" name="dl" method="post">
  <input type="hidden" name="key" value="k123">
  <input type="hidden" name="ftype" value="torrent">
</form>
</body></html>"##
    )
}

/// Minimal metafile declaring `name`
pub fn torrent_bytes(name: &str) -> Vec<u8> {
    format!(
        "d8:announce12:http://t/ann4:infod6:lengthi1e4:name{}:{}12:piece lengthi16384eee",
        name.len(),
        name
    )
    .into_bytes()
}

/// Subtitle body served by the direct file server
pub const SUBTITLE_BYTES: &[u8] = b"1\n00:00:01,000 --> 00:00:02,000\nHello\n";
